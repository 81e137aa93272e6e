pub mod mask;

pub use mask::{CredentialMask, mask_credentials};
