/// Cryptographic leaf modules for the box format.
///
/// Everything in here is a pure function over byte buffers; no module
/// touches box or collection state.
pub mod cipher;
pub mod kdf;
pub mod scalar;
pub mod sensitive;
