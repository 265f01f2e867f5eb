//! Outbound share links carrying a short candidate summary.
//!
//! Links are only constructed; nothing is sent and no response is read.

#![allow(missing_docs)]

use std::fmt;

use serde::Serialize;
use url::Url;
use url::form_urlencoded::byte_serialize;

use super::format::{rupees_or, text_or};
use crate::core::errors::Result;
use crate::dataset::CandidateRecord;
use crate::locale::catalog::keys;
use crate::locale::{Language, translate};

/// Where a summary can be shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareChannel {
    WhatsApp,
    Telegram,
    Email,
}

impl ShareChannel {
    pub const ALL: [Self; 3] = [Self::WhatsApp, Self::Telegram, Self::Email];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Telegram => "telegram",
            Self::Email => "email",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "whatsapp" | "wa" => Some(Self::WhatsApp),
            "telegram" | "tg" => Some(Self::Telegram),
            "email" | "mail" | "mailto" => Some(Self::Email),
            _ => None,
        }
    }
}

impl fmt::Display for ShareChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A constructed share URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub channel: ShareChannel,
    pub url: String,
}

/// Plain-text candidate summary, one fact per line.
#[must_use]
pub fn share_text(record: &CandidateRecord, language: Language) -> String {
    let dash = translate(language, keys::DASH);
    let mut lines = vec![
        format!("{} ({})", record.name, record.party),
        format!(
            "{}: {}",
            translate(language, keys::CONSTITUENCY),
            text_or(record.constituency.as_deref(), dash)
        ),
        format!("{}: {}", translate(language, keys::ASSETS), rupees_or(record.assets_inr, dash)),
        format!(
            "{}: {}",
            translate(language, keys::LIABILITIES),
            rupees_or(record.liabilities_inr, dash)
        ),
        format!("{}: {}", translate(language, keys::CRIMINAL_CASES), record.criminal_cases),
    ];
    if let Some(url) = &record.myneta_url {
        lines.push(format!("{}: {url}", translate(language, keys::AFFIDAVIT)));
    }
    lines.join("\n")
}

/// Percent-encode a query component, spaces as `%20`.
fn encode(value: &str) -> String {
    // form_urlencoded writes spaces as '+'; a literal '+' is already %2B.
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Build the share URL for `channel`.
pub fn share_link(
    channel: ShareChannel,
    record: &CandidateRecord,
    language: Language,
) -> Result<ShareLink> {
    let text = share_text(record, language);
    let raw = match channel {
        ShareChannel::WhatsApp => format!("https://wa.me/?text={}", encode(&text)),
        ShareChannel::Telegram => format!(
            "https://t.me/share/url?url={}&text={}",
            encode(record.myneta_url.as_deref().unwrap_or_default()),
            encode(&text)
        ),
        ShareChannel::Email => {
            let subject = format!("{} - {}", record.name, translate(language, keys::APP_TITLE));
            format!("mailto:?subject={}&body={}", encode(&subject), encode(&text))
        }
    };
    let url = Url::parse(&raw)?;
    Ok(ShareLink {
        channel,
        url: url.into(),
    })
}

/// Links for every channel, in display order.
pub fn all_share_links(record: &CandidateRecord, language: Language) -> Result<Vec<ShareLink>> {
    ShareChannel::ALL
        .into_iter()
        .map(|channel| share_link(channel, record, language))
        .collect()
}
