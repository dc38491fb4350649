//! Client-side modules, compiled to WebAssembly for the browser.
//!
//! Built with `cargo build --no-default-features --target wasm32-unknown-unknown`
//! and bound with wasm-bindgen; the bundle is served under `/static/client/`.

pub mod darkmode;
