pub mod amount;
pub mod validator_versions;
