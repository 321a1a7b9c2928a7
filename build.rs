// Build script for flutter_rust_bridge code generation
//
// Bindings are generated out of band with the CLI tool:
//   flutter_rust_bridge_codegen generate
//
// The generated files are:
// - lib/bridge/api.dart (Dart bindings)
// - rust/src/bridge_generated.rs (Rust FFI glue code)

fn main() {
    // Regenerate bindings whenever the FFI surface changes
    println!("cargo:rerun-if-changed=src/api.rs");
}
