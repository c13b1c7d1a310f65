use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected html, json, or text"
            ));
        }
    }
    if let Some(raw) = args.listen.as_deref() {
        raw.parse::<std::net::SocketAddr>()
            .map_err(|e| format!("invalid --listen '{raw}': {e}"))?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.endpoint.as_deref() {
        let trimmed = raw.trim();
        if !trimmed.is_empty()
            && !trimmed.starts_with("http://")
            && !trimmed.starts_with("https://")
        {
            return Err(format!("invalid --endpoint '{raw}', expected an http(s) URL"));
        }
    }
    Ok(())
}
