fn main() {
    env_logger::init();
    let code = velac_drv::run(std::env::args().skip(1));
    std::process::exit(code);
}
