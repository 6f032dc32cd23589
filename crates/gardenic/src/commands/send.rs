use clap::Args;
use colored::Colorize;
use gardenic::api::SiteApi;
use gardenic::forms::{
    submit_contact_form, submit_subscription_form, MemoryForm, Notice, Notifier,
    CONTACT_EMAIL, CONTACT_FIRST_NAME, CONTACT_LAST_NAME, CONTACT_MESSAGE, CONTACT_PHONE,
    DEFAULT_SUBMIT_LABEL, SUBSCRIPTION_EMAIL,
};
use gardenic::prelude::{eprintln, println, *};
use gardenic_core::model::ContactDetails;

#[derive(Args, Debug, Clone)]
pub struct SendOptions {
    /// Sender email
    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub message: String,

    /// Recipient email (defaults to the site's contact email)
    #[arg(long)]
    pub recipient: Option<String>,

    /// Send a newsletter subscription instead of a contact message
    #[arg(long, conflicts_with_all = ["first_name", "last_name", "phone", "message", "recipient"])]
    pub subscription: bool,
}

/// Prints each notice as it arrives
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(message) => println!("{}", message.green().bold()),
            Notice::Failure(message) => eprintln!("{}", message.red().bold()),
        }
    }
}

pub async fn run(options: SendOptions, global: crate::Global) -> Result<()> {
    let api = super::site_api(&global)?;
    let notifier = ConsoleNotifier;

    let result = if options.subscription {
        let mut form = MemoryForm::new()
            .with_field(SUBSCRIPTION_EMAIL, options.email)
            .with_submit("Subscribe");
        submit_subscription_form(&api, &mut form, &notifier).await
    } else {
        let recipient = match options.recipient {
            Some(recipient) => Some(recipient),
            None => ContactDetails::from_entries(&api.fetch_contact().await).email,
        };
        if global.verbose {
            println!("Recipient: {}", recipient.as_deref().unwrap_or("-"));
        }

        let mut form = MemoryForm::new()
            .with_field(CONTACT_FIRST_NAME, options.first_name)
            .with_field(CONTACT_LAST_NAME, options.last_name)
            .with_field(CONTACT_EMAIL, options.email)
            .with_field(CONTACT_PHONE, options.phone)
            .with_field(CONTACT_MESSAGE, options.message)
            .with_submit(DEFAULT_SUBMIT_LABEL);
        submit_contact_form(&api, &mut form, &notifier, recipient.as_deref()).await
    };

    let receipt = result?;
    if global.verbose {
        if let Some(message) = receipt.message {
            println!("Server: {message}");
        }
    }

    Ok(())
}
