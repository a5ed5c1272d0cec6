//! # Contact
//!
//! Sends a message through the contact form from the command line.
//!
//! Run with: `cargo run --example contact -- "Your Name" you@example.com "Hello!"`
//!
//! The endpoint and access key come from the usual config file (path in
//! `FOLIO_CONFIG`), falling back to the page defaults.

use folio::{ContactForm, FolioConfig, FormClient, FormStatus};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("folio=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(name), Some(email), Some(message)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: contact <name> <email> <message>");
        std::process::exit(2);
    };

    let config = FolioConfig::discover(None).unwrap_or_else(|err| {
        eprintln!("config: {err}");
        std::process::exit(1);
    });

    let client = FormClient::new(&config.contact);
    let mut form = ContactForm::new(config.contact.sent_duration());
    form.name = name;
    form.email = email;
    form.message = message;

    let _ = form.submit_with(&client);

    match form.status() {
        FormStatus::Sent => println!("Message sent."),
        status => {
            let reason = status.message().unwrap_or("Unknown state.");
            eprintln!("{reason}");
            std::process::exit(1);
        }
    }
}
