use std::collections::BTreeMap;

use tria_notify::PublishRequest;

/// Composes the customer notification published for `custom` tickets:
/// fixed email template around the specialist's reply, `Re: ` subject, and
/// the customer email as a string-typed message attribute when known.
pub fn compose_notification(
    ticket_subject: &str,
    reply_text: &str,
    customer_email: Option<&str>,
) -> PublishRequest {
    let message = format!(
        "Dear Customer,\n\n\
         Thank you for reaching out to our support team.\n\n\
         {reply_text}\n\n\
         If you have any further questions or need additional assistance, feel free to reply to this email.\n\n\
         Best regards,\n\
         Support Team\n"
    );

    let mut attributes = BTreeMap::new();
    if let Some(email) = customer_email {
        attributes.insert("customerEmail".to_string(), email.to_string());
    }

    PublishRequest {
        subject: format!("Re: {ticket_subject}"),
        message,
        attributes,
    }
}
