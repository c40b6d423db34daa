pub mod http_fetcher;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::app::{BreezeError, Result};
use crate::domain::RawEntry;

#[async_trait]
pub trait Fetcher {
    /// Retrieve the raw feed document. One outbound request per call.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetch `url` and decode its channel into raw entries.
pub async fn fetch_entries<F>(fetcher: &F, url: &str) -> Result<Vec<RawEntry>>
where
    F: Fetcher + ?Sized,
{
    let body = fetcher.fetch(url).await?;
    let entries = decode_channel(&body)?;
    tracing::info!("Fetched {} entries from {}", entries.len(), url);
    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
    Guid,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" => Some(Field::Description),
            b"pubDate" => Some(Field::PubDate),
            b"guid" => Some(Field::Guid),
            _ => None,
        }
    }

    fn slot<'a>(&self, entry: &'a mut RawEntry) -> &'a mut String {
        match self {
            Field::Title => &mut entry.title,
            Field::Link => &mut entry.link,
            Field::Description => &mut entry.description,
            Field::PubDate => &mut entry.pub_date,
            Field::Guid => &mut entry.guid,
        }
    }
}

/// Decode the `<item>` elements of an RSS channel.
///
/// Text and CDATA sections are concatenated per field and the joined value is
/// trimmed once when the field closes. Undecodable entities and a document
/// without a `<channel>` element are rejected.
pub fn decode_channel(body: &[u8]) -> Result<Vec<RawEntry>> {
    let mut reader = Reader::from_reader(body);

    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut saw_channel = false;
    let mut current: Option<RawEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"channel" => saw_channel = true,
                b"item" => {
                    current = Some(RawEntry::default());
                    field = None;
                }
                name if current.is_some() => field = Field::from_name(name),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    field = None;
                }
                name if Field::from_name(name) == field => {
                    if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                        let slot = f.slot(entry);
                        *slot = slot.trim().to_string();
                    }
                    field = None;
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = e.unescape().map_err(|err| {
                        BreezeError::FeedParse(format!(
                            "bad text at byte {}: {}",
                            reader.buffer_position(),
                            err
                        ))
                    })?;
                    f.slot(entry).push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    f.slot(entry).push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BreezeError::FeedParse(format!(
                    "XML parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_channel {
        return Err(BreezeError::FeedParse(
            "document has no <channel> element".to_string(),
        ));
    }

    Ok(entries)
}
