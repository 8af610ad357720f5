pub mod asset;
pub mod blob_copy;
pub mod transform;
