// src/config/consts.rs

// Markup
pub const SD_CLASS: &str = "SD";
pub const SD_PARAMS_CLASS: &str = "sdParams";
pub const SD_PARAMS_SEP: char = ';';
pub const SIGPOINT_CLASS: &str = "sigpoint";

// Publication frames
pub const NAV_BASE_FRAME: &str = "eAISNavigationBase";
pub const NAV_FRAME: &str = "eAISNavigation";
pub const CONTENT_FRAME: &str = "eAISContent";
pub const INDEX_FILE_PREFIX: &str = "index-";

// Schema
pub const ROWID: &str = "ROWID";
pub const NEXT_PREFIX: &str = "NEXT_";
pub const FK_INFIX: &str = "_FK_";
pub const M2M_PREFIX: &str = "M2M";

// Airspace tables
pub const T_AIRSPACE: &str = "TAIRSPACE";
pub const T_AIRSPACE_VERTEX: &str = "TAIRSPACE_VERTEX";
pub const T_AIRSPACE_VOLUME: &str = "TAIRSPACE_VOLUME";
pub const T_AIRSPACE_LAYER_CLASS: &str = "TAIRSPACE_LAYER_CLASS";
pub const T_AIRSPACE_POLYGON: &str = "TAIRSPACE_POLYGON";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_JSON_FILE: &str = "aip";

// Concurrency
pub const WORKERS: usize = 4;
