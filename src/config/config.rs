pub const APP_NAME: &str = "Configuration Editor";

pub const CONFIG_DIR: &str = "config";
pub const CONFIG_FILE: &str = "configs.json";
pub const LANG_DIR: &str = "lang";

pub const WINDOW_WIDTH: f32 = 1000.0;
pub const WINDOW_HEIGHT: f32 = 700.0;
pub const MIN_WINDOW_WIDTH: f32 = 400.0;
pub const MIN_WINDOW_HEIGHT: f32 = 300.0;
