pub(crate) mod provider_path;
pub(crate) mod provider_session;
