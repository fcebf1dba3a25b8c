use log::LevelFilter;

fn main() {
  simple_logger::SimpleLogger::new()
    .with_level(LevelFilter::Debug)
    .init()
    .ok();
  run();
}

#[cfg(windows)]
fn run() {
  match rascred::set_credentials("Example VPN", None, "username", "password") {
    Ok(()) => println!("stored credentials updated"),
    Err(err) => {
      eprintln!("failed to update stored credentials: {err}");
      std::process::exit(1);
    }
  }
}

#[cfg(not(windows))]
fn run() {
  eprintln!("rascred talks to the Windows RAS subsystem and does nothing on this platform");
  std::process::exit(1);
}
