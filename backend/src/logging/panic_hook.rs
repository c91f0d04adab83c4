//! Route panics that escape request handling to the logger.

use std::any::Any;
use std::panic;

use serde_json::json;

use super::Logger;
use crate::domain::TraceId;

/// Log every panic at `fatal`, then defer to the previously installed hook.
pub fn install_panic_hook(logger: Logger) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|at| format!("{}:{}:{}", at.file(), at.line(), at.column()));
        let trace_id = TraceId::current().map(|id| id.to_string());
        logger.fatal(
            "uncaught panic",
            &json!({
                "panic": panic_message(info.payload()),
                "location": location,
                "traceId": trace_id,
            }),
        );
        previous(info);
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
