use astdec::ast::DecodeObserver;

/// Observer printing one `trace:` line per decoder event.
pub(crate) struct StderrTrace;

impl DecodeObserver for StderrTrace {
	fn stream_opened(&mut self, description: &str, offset: usize, len: usize) {
		eprintln!("trace: stream {description} at {offset} ({len} bytes)");
	}

	fn tag_read(&mut self, stream: &str, tag: &str) {
		eprintln!("trace: tag {tag} from {stream}");
	}

	fn field_stream(&mut self, shape: &str, field: &str, stream: &str, redirected: bool) {
		let marker = if redirected { " (redirected)" } else { "" };
		eprintln!("trace: field {shape}.{field} from {stream}{marker}");
	}

	fn object_inlined(&mut self, shape: &str, stream: &str) {
		eprintln!("trace: inline {shape} from {stream}");
	}

	fn object_populated(&mut self, index: usize, shape: &str) {
		eprintln!("trace: slot {index} = {shape}");
	}
}
