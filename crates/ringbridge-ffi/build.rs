use std::env;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-env-changed=RING_LIB_DIR");

    if env::var_os("CARGO_FEATURE_RING_VM").is_none() {
        return;
    }
    // libring location for native and emscripten builds
    if let Some(dir) = env::var_os("RING_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", Path::new(&dir).display());
    }
}
