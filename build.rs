#[cfg(windows)]
extern crate winres;

#[cfg(windows)]
fn main() {
    let mut res = winres::WindowsResource::new();
    res.set("FileDescription", "DCS-gRPC Installer");
    res.set("ProductName", "DCS-gRPC Installer");
    res.set("OriginalFilename", "DcsGrpcInstaller.exe");
    res.compile().unwrap();

    // Only hide console in release builds
    if std::env::var("PROFILE").unwrap() == "release" {
        println!("cargo:rustc-link-arg=/SUBSYSTEM:WINDOWS");
        println!("cargo:rustc-link-arg=/ENTRY:mainCRTStartup");
    }
}

#[cfg(not(windows))]
fn main() {}
