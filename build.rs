//! Build script compiling the C dot product kernels.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");

    let build = cc::Build::new();
    let compiler = build.get_compiler();

    let compiler_name = if compiler.is_like_clang() {
        // Vanilla Clang shares the LLVM backend with rustc, so it would only
        // repeat the Rust numbers. Apple Clang is the system compiler on macOS.
        if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "macos" {
            Some("Apple Clang")
        } else {
            println!("cargo:warning=Vanilla Clang detected. C kernels disabled (requires GCC, MSVC, or Apple Clang).");
            None
        }
    } else if compiler.is_like_gnu() {
        Some("GCC")
    } else if compiler.is_like_msvc() {
        Some("MSVC")
    } else {
        println!("cargo:warning=C compiler is not compatible (needs GCC, Clang, or MSVC). C kernels disabled.");
        None
    };

    let Some(compiler_name) = compiler_name else {
        return;
    };

    let rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let encoded_rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    let is_rust_native =
        rustflags.contains("target-cpu=native") || encoded_rustflags.contains("target-cpu=native");

    let mut build = cc::Build::new();

    let c_files = glob::glob("src/**/*.c")
        .expect("Failed to read glob pattern")
        .filter_map(|entry| entry.ok());

    for file in c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    // No -ffast-math: the kernels must keep their summation order so the
    // C and Rust variants stay comparable term for term.
    build.opt_level(3).flag_if_supported("-fno-fast-math");

    if is_rust_native {
        build.flag_if_supported("-march=native");
        println!("cargo:warning=Detected Rust target-cpu=native. Enabling -march=native for C compilation.");
    }

    build.compile("dot_kernel_c");

    println!("cargo:rustc-cfg=c_implementation_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
