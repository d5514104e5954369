//! Cookbook card rendering

use crate::error::RenderError;
use crate::styles::StyleTable;
use crate::types::CookbookRecord;
use pythia_common::tree::{div, image, span, text, Node};
use std::iter;

/// First class of every card; client-side filtering selects on it
pub const TAGGED_CARD_CLASS: &str = "tagged-card";

/// Build the card for one cookbook
///
/// The card links to the book, carries every tag as a class (after
/// [`TAGGED_CARD_CLASS`]) and shows title, thumbnail and one styled label per
/// tag.
pub fn render_card(record: &CookbookRecord, styles: &StyleTable) -> Result<Node, RenderError> {
    require("title", &record.title)?;
    require("book_url", &record.book_url)?;
    require("image_url", &record.image_url)?;

    let classes = iter::once(TAGGED_CARD_CLASS).chain(record.all_tags());

    let labels: Vec<Node> = record
        .tags
        .iter()
        .filter(|(_, tags)| !tags.is_empty())
        .flat_map(|(category, tags)| {
            let style = styles.for_key(category).to_value();
            tags.iter()
                .map(move |tag| span(vec![text(tag.as_str())]).with_style(style.clone()))
        })
        .collect();

    let title = Node::parent("cardTitle", vec![text(record.title.as_str())]);
    let body = div(vec![image(record.image_url.as_str()), div(labels)]);

    Ok(Node::parent("card", vec![title, body])
        .with("url", record.book_url.as_str())
        .with_class(classes))
}

fn require(field: &'static str, value: &str) -> Result<(), RenderError> {
    if value.trim().is_empty() {
        return Err(RenderError::EmptyField { field });
    }
    Ok(())
}
