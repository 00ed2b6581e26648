pub fn run() {
    println!("findlight {}", env!("CARGO_PKG_VERSION"));
}
