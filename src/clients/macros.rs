/// Declares a client wrapper around `ResourceClient<$entity>` with `new`,
/// `get_<name>`, `require_<name>` and an [`ActorClient`](actor_framework::ActorClient)
/// impl whose errors map onto [`MarketError`](crate::error::MarketError).
#[macro_export]
macro_rules! market_client {
    ($(#[$meta:meta])* $client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $client_name {
            inner: actor_framework::ResourceClient<$entity>,
        }

        paste::paste! {
            impl $client_name {
                pub fn new(inner: actor_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as actor_framework::ActorEntity>::Id,
                ) -> Result<Option<$entity>, $crate::error::MarketError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err($crate::error::MarketError::from)
                }

                /// Like `get`, but a missing entity is `NotFound`.
                #[tracing::instrument(skip(self))]
                pub async fn [<require_ $entity_name_snake>](
                    &self,
                    id: <$entity as actor_framework::ActorEntity>::Id,
                ) -> Result<$entity, $crate::error::MarketError> {
                    tracing::debug!("Sending request");
                    self.inner
                        .get(id.clone())
                        .await
                        .map_err($crate::error::MarketError::from)?
                        .ok_or_else(|| $crate::error::MarketError::NotFound(id.to_string()))
                }
            }
        }

        #[async_trait::async_trait]
        impl actor_framework::ActorClient<$entity> for $client_name {
            type Error = $crate::error::MarketError;

            fn inner(&self) -> &actor_framework::ResourceClient<$entity> {
                &self.inner
            }

            fn map_error(
                e: actor_framework::FrameworkError<$crate::error::MarketError>,
            ) -> Self::Error {
                $crate::error::MarketError::from(e)
            }
        }
    };
}
