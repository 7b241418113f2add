/// Generates the read/delete methods every collection client shares:
/// `get_<x>`, `require_<x>` (NotFound when missing), `list_<x>s` and `delete_<x>`.
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.get(id).await?)
                }

                pub async fn [<require_ $entity_name_snake>](&self, id: String) -> Result<$entity, $error> {
                    self.[<get_ $entity_name_snake>](id.clone())
                        .await?
                        .ok_or(<$error>::NotFound(id))
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.list().await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: String) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.delete(id).await?)
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $error, $entity_name_snake);
    };
}
