pub const DEFAULT_AJAX_SERVER: &str = "https://writing.hopto.org/webapi/";
// declared for the streaming transport, which is not implemented
pub const DEFAULT_WSS_SERVER: &str = "https://writing.hopto.org/webapi/";
pub const EXPERIMENTAL_WEBSOCKET: bool = false;

/// Key of the endpoint override in persistent storage.
pub const PROCESS_SERVER_KEY: &str = "process-server";

pub const APP_DIR_NAME: &str = "wobserver";
pub const STORAGE_FILE_NAME: &str = "storage.json";
pub const LOG_FILE_NAME: &str = "wobserver.log";
pub const ENV_PREFIX: &str = "WOBSERVER";
