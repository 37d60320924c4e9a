//! Unit tests for `AppError` display format and conversions.

use draft_room::AppError;

#[test]
fn each_variant_is_prefixed_with_its_category() {
    let cases = [
        (AppError::Config("bad".into()), "config: bad"),
        (AppError::Startup("bad".into()), "startup: bad"),
        (AppError::Capacity("bad".into()), "capacity: bad"),
        (AppError::Transport("bad".into()), "transport: bad"),
        (AppError::Turn("bad".into()), "turn: bad"),
        (AppError::Io("bad".into()), "io: bad"),
    ];
    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn capacity_is_distinct_from_transport() {
    let capacity = AppError::Capacity("session full".into());
    let transport = AppError::Transport("session full".into());
    assert_ne!(capacity.to_string(), transport.to_string());
}

#[test]
fn toml_error_maps_to_config() {
    let toml_err = toml::from_str::<toml::Value>("= broken").expect_err("invalid toml");
    let err = AppError::from(toml_err);
    assert!(matches!(err, AppError::Config(ref msg) if msg.starts_with("invalid config")));
}

#[test]
fn io_error_maps_to_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
    let err = AppError::from(io_err);
    assert!(matches!(err, AppError::Io(ref msg) if msg.contains("port taken")));
}

#[test]
fn implements_std_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(AppError::Turn("not on the clock".into()));
    assert_eq!(err.to_string(), "turn: not on the clock");
}

#[test]
fn debug_representation_names_variant() {
    let debug = format!("{:?}", AppError::Startup("catalog is empty".into()));
    assert!(debug.contains("Startup"));
    assert!(debug.contains("catalog is empty"));
}
