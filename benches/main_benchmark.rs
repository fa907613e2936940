use buildscript::build::configure_args;
use buildscript::request::{BuildRequest, BuildType, CommandKind};
use buildscript::toolchain::{OsKind, PlatformProfile};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::path::PathBuf;

fn host_profile() -> PlatformProfile {
    PlatformProfile::new(OsKind::Linux).with_compilers(
        Some(PathBuf::from("/usr/bin/gcc")),
        Some(PathBuf::from("/usr/bin/g++")),
    )
}

fn bench_configure_host(c: &mut Criterion) {
    let profile = host_profile();
    let mut request = BuildRequest::new([CommandKind::Build]);
    request.build_type = BuildType::Release;

    c.bench_function("configure_args_host", |b| {
        b.iter(|| configure_args(black_box(&profile), black_box(&request)))
    });
}

fn bench_configure_cross(c: &mut Criterion) {
    let profile = host_profile();
    let mut request = BuildRequest::new([CommandKind::Clean, CommandKind::Build]);
    request.target = Some("Tm4c123".to_string());
    request.toolchain_file = Some(PathBuf::from("cmake/tm4c123.cmake"));

    c.bench_function("configure_args_cross", |b| {
        b.iter(|| configure_args(black_box(&profile), black_box(&request)))
    });
}

criterion_group!(benches, bench_configure_host, bench_configure_cross);
criterion_main!(benches);
