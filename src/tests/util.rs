use crate::Value;

pub fn json_to_value(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}
