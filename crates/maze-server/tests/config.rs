// crates/maze-server/tests/config.rs
//
// Single test: the environment is process-wide.

use std::env;
use std::time::Duration;

use maze_server::config::Config;

#[test]
fn env_overrides_and_bad_values() {
    for key in ["MAZE_PORT", "MAZE_DEFAULT_PACE_MS", "MAZE_STREAM_REJECT_WALLS"] {
        env::remove_var(key);
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.default_pace, Duration::from_millis(100));
    assert!(!config.stream_policy().reject_walls);

    env::set_var("MAZE_PORT", "9000");
    env::set_var("MAZE_DEFAULT_PACE_MS", " 25 ");
    env::set_var("MAZE_STREAM_REJECT_WALLS", "true");
    let config = Config::from_env().unwrap();
    assert_eq!(config.socket_addr_string(), "0.0.0.0:9000");
    assert_eq!(config.default_pace, Duration::from_millis(25));
    assert!(config.stream_policy().reject_walls);

    env::set_var("MAZE_PORT", "not-a-port");
    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("MAZE_PORT"));

    for key in ["MAZE_PORT", "MAZE_DEFAULT_PACE_MS", "MAZE_STREAM_REJECT_WALLS"] {
        env::remove_var(key);
    }
}
