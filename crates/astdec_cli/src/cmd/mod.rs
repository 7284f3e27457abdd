/// Module decode command.
pub mod decode;
/// Container information command.
pub mod info;
/// Decoded value rendering.
pub mod print;
/// Stderr observer behind `--trace`.
pub(crate) mod trace;
/// Shared option loading and output helpers.
pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;
