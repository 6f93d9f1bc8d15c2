//! Display targets and target resolution.
//!
//! Hosts implement [`DisplayTarget`] for whatever shows the number and
//! [`TargetResolver`] for id lookups. [`memory`] provides an in-process host.

/// How a target receives text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// Form inputs get a value assignment.
    Input,
    /// `text`/`tspan` vector-graphics nodes get text content.
    SvgText,
    /// Everything else gets markup.
    Markup,
}

impl TargetKind {
    pub fn from_tag_name(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("input") {
            TargetKind::Input
        } else if tag == "text" || tag == "tspan" {
            TargetKind::SvgText
        } else {
            TargetKind::Markup
        }
    }
}

/// Something the animator writes formatted text into.
pub trait DisplayTarget {
    fn kind(&self) -> TargetKind;
    fn set_value(&mut self, text: &str);
    fn set_text_content(&mut self, text: &str);
    fn set_inner_html(&mut self, text: &str);

    /// Write `text` through the channel matching [`DisplayTarget::kind`].
    fn print(&mut self, text: &str) {
        match self.kind() {
            TargetKind::Input => self.set_value(text),
            TargetKind::SvgText => self.set_text_content(text),
            TargetKind::Markup => self.set_inner_html(text),
        }
    }
}

/// Resolves element ids to display targets (document lookup).
pub trait TargetResolver {
    type Target: DisplayTarget + Clone;
    fn resolve(&mut self, id: &str) -> Option<Self::Target>;
}

/// Either a target handed over directly or an id to look up.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetRef<T> {
    Element(T),
    Id(String),
    /// The caller passed nothing usable.
    Missing,
}

impl<T> TargetRef<T> {
    /// Short description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TargetRef::Element(_) => "<element>".to_string(),
            TargetRef::Id(id) => format!("#{id}"),
            TargetRef::Missing => "null".to_string(),
        }
    }
}

pub mod memory {
    //! In-memory document used by native hosts and tests.

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::{DisplayTarget, TargetKind, TargetResolver};

    /// Which setter last wrote to an element.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum WriteChannel {
        Value,
        TextContent,
        InnerHtml,
    }

    #[derive(Debug)]
    struct ElementState {
        kind: TargetKind,
        text: String,
        channel: Option<WriteChannel>,
        writes: usize,
    }

    /// Shared handle to an element; clones observe the same state.
    #[derive(Clone, Debug)]
    pub struct MemoryElement {
        state: Rc<RefCell<ElementState>>,
    }

    impl MemoryElement {
        pub fn new(kind: TargetKind) -> Self {
            Self {
                state: Rc::new(RefCell::new(ElementState {
                    kind,
                    text: String::new(),
                    channel: None,
                    writes: 0,
                })),
            }
        }

        pub fn with_tag(tag: &str) -> Self {
            Self::new(TargetKind::from_tag_name(tag))
        }

        pub fn text(&self) -> String {
            self.state.borrow().text.clone()
        }

        pub fn last_channel(&self) -> Option<WriteChannel> {
            self.state.borrow().channel
        }

        pub fn write_count(&self) -> usize {
            self.state.borrow().writes
        }

        fn write(&mut self, text: &str, channel: WriteChannel) {
            let mut s = self.state.borrow_mut();
            s.text = text.to_string();
            s.channel = Some(channel);
            s.writes += 1;
        }
    }

    impl DisplayTarget for MemoryElement {
        fn kind(&self) -> TargetKind {
            self.state.borrow().kind
        }
        fn set_value(&mut self, text: &str) {
            self.write(text, WriteChannel::Value);
        }
        fn set_text_content(&mut self, text: &str) {
            self.write(text, WriteChannel::TextContent);
        }
        fn set_inner_html(&mut self, text: &str) {
            self.write(text, WriteChannel::InnerHtml);
        }
    }

    /// Id → element table.
    #[derive(Clone, Debug, Default)]
    pub struct MemoryDocument {
        elements: Rc<RefCell<HashMap<String, MemoryElement>>>,
    }

    impl MemoryDocument {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register an element under `id` and return a handle to it.
        pub fn insert(&self, id: &str, tag: &str) -> MemoryElement {
            let el = MemoryElement::with_tag(tag);
            self.elements
                .borrow_mut()
                .insert(id.to_string(), el.clone());
            el
        }

        pub fn get(&self, id: &str) -> Option<MemoryElement> {
            self.elements.borrow().get(id).cloned()
        }
    }

    impl TargetResolver for MemoryDocument {
        type Target = MemoryElement;

        fn resolve(&mut self, id: &str) -> Option<MemoryElement> {
            self.get(id)
        }
    }
}
