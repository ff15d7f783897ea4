use rrbusiness::config::Config;

/// Prints the effective configuration, secrets left out.
pub fn check_config(config: &Config) -> anyhow::Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("listen:           {}:{}", config.server.host, config.server.port);
    println!(
        "static dir:       {}",
        config.server.static_dir.as_deref().unwrap_or("-")
    );
    println!("allowed origins:  {}", config.cors.allowed_origins.join(", "));
    println!("missing origin:   {}", allowed(config.cors.allow_missing_origin));
    println!(
        "smtp:             {}:{} ({})",
        config.email.smtp_host,
        config.email.smtp_port,
        if config.email.smtp_password.is_empty() {
            "unauthenticated"
        } else {
            "authenticated"
        }
    );
    println!("from:             {}", config.email.from_header());
    println!("to:               {}", config.email.contact_address);
    println!("send timeout:     {}s", config.email.send_timeout_secs);

    Ok(())
}

fn allowed(value: bool) -> &'static str {
    if value { "allowed" } else { "refused" }
}
