//! Streaming parse of the first `<item>` of an RSS 2.0 feed.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::{DevotionalItem, FeedError};

/// Parse the first `<item>` of an RSS feed from raw XML bytes.
pub fn parse_first_item(xml: &[u8]) -> Result<DevotionalItem, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current_item: Option<ItemBuilder> = None;
    // Name of the direct child of <item> we are inside, if any.
    let mut current_field: Option<String> = None;
    let mut depth_in_item = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match current_item {
                    None if name == "item" => {
                        current_item = Some(ItemBuilder::default());
                        depth_in_item = 0;
                    }
                    Some(_) => {
                        depth_in_item += 1;
                        if depth_in_item == 1 {
                            current_field = Some(name);
                        }
                    }
                    None => {}
                }
            }
            Ok(Event::End(e)) => {
                if current_item.is_none() {
                    buf.clear();
                    continue;
                }
                if depth_in_item == 0 && e.name().as_ref() == b"item" {
                    if let Some(builder) = current_item.take() {
                        return builder.build();
                    }
                }
                depth_in_item = depth_in_item.saturating_sub(1);
                if depth_in_item == 0 {
                    current_field = None;
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(item), Some(field)) = (current_item.as_mut(), current_field.as_deref()) {
                    match e.unescape() {
                        Ok(text) => item.push(field, &text),
                        // HTML named entities (&nbsp;, &rsquo;) are not XML entities.
                        Err(err) => {
                            tracing::debug!(field, "XML unescape failed ({}); decoding as HTML", err);
                            let raw = String::from_utf8_lossy(&e);
                            item.push(field, &super::decode_html_entities(&raw));
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(item), Some(field)) = (current_item.as_mut(), current_field.as_deref()) {
                    item.push(field, &String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    match current_item {
        // Truncated feed: keep what the first item had.
        Some(builder) => builder.build(),
        None => Err(FeedError::NoItems),
    }
}

#[derive(Default)]
struct ItemBuilder {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
    creator: Option<String>,
    description: Option<String>,
    image: Option<String>,
}

impl ItemBuilder {
    fn push(&mut self, field: &str, text: &str) {
        let slot = match field {
            "title" => &mut self.title,
            "link" => &mut self.link,
            "pubDate" => &mut self.pub_date,
            "dc:creator" => &mut self.creator,
            "description" => &mut self.description,
            "image" => &mut self.image,
            _ => return,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn build(self) -> Result<DevotionalItem, FeedError> {
        let title = non_empty(self.title).ok_or(FeedError::MissingField("title"))?;
        let link = non_empty(self.link).ok_or(FeedError::MissingField("link"))?;
        let description = non_empty(self.description).unwrap_or_default();
        let image = non_empty(self.image).or_else(|| super::first_img_src(&description));

        Ok(DevotionalItem {
            title,
            link,
            pub_date: non_empty(self.pub_date).unwrap_or_default(),
            creator: non_empty(self.creator).unwrap_or_else(|| "Unknown".to_string()),
            description,
            image,
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
