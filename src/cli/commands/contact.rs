//! Contact command - relay a contact request to the CMS

use crate::cli::args::ContactArgs;
use crate::cms::ContactRequest;
use crate::config::Config;
use crate::error::{OstrivError, OstrivResult};
use crate::storefront::Storefront;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the contact command
pub async fn execute(args: ContactArgs, config: &Config) -> OstrivResult<()> {
    let ctx = UiContext::detect();
    let storefront = Storefront::from_config(config)?;
    let relay = storefront.contact_relay();

    let request = ContactRequest {
        name: args.name,
        phone: args.phone,
        email: args.email,
        message: args.message,
    };

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Sending contact request...");
    let response = match relay.submit(&request).await {
        Ok(response) => response,
        Err(e) => {
            spinner.stop_error("Contact request failed");
            return Err(e);
        }
    };

    if response.is_success() {
        spinner.stop("Contact request sent");
        ui::step_ok_detail(&ctx, "Accepted by CMS", &format!("HTTP {}", response.status));
        return Ok(());
    }

    spinner.stop_error("Contact request rejected");
    ui::step_error_detail(&ctx, &format!("HTTP {}", response.status), &response.body);
    Err(OstrivError::User(format!(
        "CMS rejected the contact request (HTTP {})",
        response.status
    )))
}
