use serde::Serialize;

use golinks_core::{Link, LinkGroup};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum TextObject {
    #[serde(rename = "plain_text")]
    Plain { text: String },
    #[serde(rename = "mrkdwn")]
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonElement {
    #[serde(rename = "type")]
    kind: &'static str,
    pub action_id: String,
    pub text: TextObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ButtonElement {
    pub fn new(action_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: "button",
            action_id: action_id.into(),
            text: TextObject::plain(label),
            url: None,
            value: None,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section {
        block_id: String,
        text: TextObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<ButtonElement>,
    },
    Context {
        block_id: String,
        elements: Vec<TextObject>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageTemplate {
    pub fallback_text: String,
    pub blocks: Vec<Block>,
}

pub struct MessageBuilder {
    fallback_text: String,
    blocks: Vec<Block>,
}

impl MessageBuilder {
    pub fn new(fallback_text: impl Into<String>) -> Self {
        Self { fallback_text: fallback_text.into(), blocks: Vec::new() }
    }

    pub fn section<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut SectionBuilder),
    {
        let mut builder = SectionBuilder::default();
        build(&mut builder);
        let (text, accessory) = builder.build();
        self.blocks.push(Block::Section { block_id: block_id.into(), text, accessory });
        self
    }

    pub fn context<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut ContextBuilder),
    {
        let mut builder = ContextBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Context { block_id: block_id.into(), elements: builder.build() });
        self
    }

    pub fn build(self) -> MessageTemplate {
        MessageTemplate { fallback_text: self.fallback_text, blocks: self.blocks }
    }
}

#[derive(Default)]
pub struct SectionBuilder {
    text: Option<TextObject>,
    accessory: Option<ButtonElement>,
}

impl SectionBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::mrkdwn(text));
        self
    }

    pub fn accessory(&mut self, button: ButtonElement) -> &mut Self {
        self.accessory = Some(button);
        self
    }

    fn build(self) -> (TextObject, Option<ButtonElement>) {
        (self.text.unwrap_or_else(|| TextObject::plain("")), self.accessory)
    }
}

#[derive(Default)]
pub struct ContextBuilder {
    elements: Vec<TextObject>,
}

impl ContextBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> Vec<TextObject> {
        self.elements
    }
}

/// Card for a single resolved link: title-cased name, the target, and a
/// "Go" button opening the stored URL.
pub fn link_message(link: &Link) -> MessageTemplate {
    MessageBuilder::new(format!("{}: {}", link.name, link.url))
        .section("link.result.v1", |section| {
            section
                .mrkdwn(format!("*{}*\n{}", title_case(&link.name), link.url))
                .accessory(ButtonElement::new("link.go.v1", "Go").url(&link.url).value(&link.name));
        })
        .build()
}

/// Listing for a group-prefix match on `/go`.
pub fn group_message(prefix: &str, links: &[Link]) -> MessageTemplate {
    MessageBuilder::new(format!("{} links in group `{prefix}`", links.len()))
        .section("link.group.header.v1", |section| {
            section.mrkdwn(format!("*{prefix}* has {} links:\n{}", links.len(), bullet_lines(links)));
        })
        .context("link.group.footer.v1", |context| {
            context.plain("Use `/go <name>` to jump straight to one of them.");
        })
        .build()
}

/// Full `/list` view: one titled section per group, deterministic order.
pub fn directory_message(groups: &[LinkGroup]) -> MessageTemplate {
    let total: usize = groups.iter().map(|group| group.links.len()).sum();
    let mut builder = MessageBuilder::new(format!("Link directory ({total} links)"));

    for group in groups {
        builder = builder.section(format!("link.directory.{}.v1", group.name), |section| {
            section.mrkdwn(format!("*{}*\n{}", group.name, bullet_lines(&group.links)));
        });
    }

    builder
        .context("link.directory.footer.v1", |context| {
            context.plain(format!(
                "{total} links in {} groups. `/add <name> <url>` registers a new one.",
                groups.len()
            ));
        })
        .build()
}

fn bullet_lines(links: &[Link]) -> String {
    links
        .iter()
        .map(|link| format!("• <{}|{}>", link.url, link.name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_case(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    let mut upcase_next = true;

    for ch in name.chars() {
        if upcase_next {
            output.extend(ch.to_uppercase());
        } else {
            output.push(ch);
        }
        upcase_next = ch == '-' || ch.is_whitespace();
    }

    output
}
