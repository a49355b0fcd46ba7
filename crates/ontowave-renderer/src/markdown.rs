//! The Markdown pipeline.
//!
//! Source text is parsed with markdown-weaver, the event stream is rewritten
//! (heading anchors, math, code highlighting, bare URL autolinks, external
//! link attributes, raw HTML policy) and the result goes through the stock
//! HTML writer. The renderer holds no per-call state, so the same input
//! always yields the same output.

use std::sync::LazyLock;

use markdown_weaver::{CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Parser, Tag, TagEnd};
use markdown_weaver_escape::{escape_href, escape_html};

use crate::math::MathMode;
use crate::options::{AnchorStyle, ExternalLinkPolicy, RenderOptions};
use crate::utils::SlugSet;
use crate::{Regex, links, math};


static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bhttps?://[^\s<>"]+"#).expect("bare url regex"));
static RAW_ANCHOR_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)<a[\s>]").expect("raw anchor open regex"));
static RAW_ANCHOR_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)</a\s*>").expect("raw anchor close regex"));

#[derive(Debug, Default, Clone)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options.md_options());
        let mut pipeline = Pipeline::new(&self.options);
        for event in parser {
            pipeline.push(event);
        }
        let events = pipeline.finish();

        let mut html = String::with_capacity(source.len() * 3 / 2);
        markdown_weaver::html::push_html(&mut html, events.into_iter());
        html
    }
}

struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    events: Vec<Event<'a>>,
    text: String,
}

struct Pipeline<'o, 'a> {
    options: &'o RenderOptions,
    out: Vec<Event<'a>>,
    text: String,
    heading: Option<PendingHeading<'a>>,
    code: Option<(Option<String>, String)>,
    /// One entry per open link: whether its start was replaced by raw HTML.
    links: Vec<bool>,
    /// Open links and images; no autolinking inside them.
    link_depth: usize,
    slugs: SlugSet,
}

impl<'o, 'a> Pipeline<'o, 'a> {
    fn new(options: &'o RenderOptions) -> Self {
        Self {
            options,
            out: Vec::new(),
            text: String::new(),
            heading: None,
            code: None,
            links: Vec::new(),
            link_depth: 0,
            slugs: SlugSet::default(),
        }
    }

    fn push(&mut self, event: Event<'a>) {
        match event {
            Event::Text(text) => match self.code.as_mut() {
                Some((_, buffer)) => buffer.push_str(&text),
                None => self.text.push_str(&text),
            },
            other => {
                self.flush_text();
                self.handle(other);
            }
        }
    }

    fn finish(mut self) -> Vec<Event<'a>> {
        self.flush_text();
        self.out
    }

    fn handle(&mut self, event: Event<'a>) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((lang, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, buffer)) = self.code.take() {
                    self.emit(Event::Html(CowStr::from(render_code(
                        lang.as_deref(),
                        &buffer,
                    ))));
                }
            }
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                self.heading = Some(PendingHeading {
                    level,
                    id,
                    classes,
                    attrs,
                    events: Vec::new(),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(level)) => self.finish_heading(level),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                self.link_depth += 1;
                let new_context = self.options.external_links == ExternalLinkPolicy::NewContext
                    && links::is_external(&dest_url);
                self.links.push(new_context);
                if new_context {
                    self.emit(Event::InlineHtml(CowStr::from(external_anchor(
                        &dest_url, &title,
                    ))));
                } else {
                    self.emit(Event::Start(Tag::Link {
                        link_type,
                        dest_url,
                        title,
                        id,
                    }));
                }
            }
            Event::End(TagEnd::Link) => {
                self.link_depth = self.link_depth.saturating_sub(1);
                if self.links.pop().unwrap_or(false) {
                    self.emit(Event::InlineHtml(CowStr::Borrowed("</a>")));
                } else {
                    self.emit(Event::End(TagEnd::Link));
                }
            }
            Event::Start(tag @ Tag::Image { .. }) => {
                self.link_depth += 1;
                self.emit(Event::Start(tag));
            }
            Event::End(TagEnd::Image) => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.emit(Event::End(TagEnd::Image));
            }
            Event::InlineMath(tex) => self.emit_math(&tex, MathMode::Inline),
            Event::DisplayMath(tex) => self.emit_math(&tex, MathMode::Display),
            Event::Html(html) if !self.options.raw_html => self.emit(Event::Text(html)),
            Event::InlineHtml(html) if !self.options.raw_html => self.emit(Event::Text(html)),
            Event::InlineHtml(html) => {
                // text inside a hand-written <a> is already a link
                if RAW_ANCHOR_OPEN_RE.is_match(&html) {
                    self.link_depth += 1;
                } else if RAW_ANCHOR_CLOSE_RE.is_match(&html) {
                    self.link_depth = self.link_depth.saturating_sub(1);
                }
                self.emit(Event::InlineHtml(html));
            }
            other => self.emit(other),
        }
    }

    fn emit_math(&mut self, tex: &str, mode: MathMode) {
        let mut html = String::new();
        math::push_math(&mut html, tex, mode);
        self.emit(Event::InlineHtml(CowStr::from(html)));
    }

    fn emit(&mut self, event: Event<'a>) {
        match self.heading.as_mut() {
            Some(heading) => {
                if let Event::Text(text) | Event::Code(text) = &event {
                    heading.text.push_str(text);
                }
                heading.events.push(event);
            }
            None => self.out.push(event),
        }
    }

    /// Emit merged text, splitting out bare URLs as autolinks.
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        if !self.options.linkify || self.link_depth > 0 {
            self.emit(Event::Text(CowStr::from(text)));
            return;
        }

        let mut last = 0;
        for found in BARE_URL_RE.find_iter(&text) {
            let url = trim_url(found.as_str());
            if url.is_empty() {
                continue;
            }
            let start = found.start();
            if start > last {
                self.emit(Event::Text(CowStr::from(text[last..start].to_string())));
            }
            self.handle(Event::Start(Tag::Link {
                link_type: LinkType::Autolink,
                dest_url: CowStr::from(url.to_string()),
                title: CowStr::Borrowed(""),
                id: CowStr::Borrowed(""),
            }));
            self.emit(Event::Text(CowStr::from(url.to_string())));
            self.handle(Event::End(TagEnd::Link));
            last = start + url.len();
        }
        if last < text.len() {
            self.emit(Event::Text(CowStr::from(text[last..].to_string())));
        }
    }

    fn finish_heading(&mut self, level: HeadingLevel) {
        let Some(heading) = self.heading.take() else {
            self.emit(Event::End(TagEnd::Heading(level)));
            return;
        };
        let slug = match &heading.id {
            Some(id) => id.to_string(),
            None => self.slugs.unique(&heading.text),
        };

        let mut anchor = String::new();
        let _ = escape_href(&mut anchor, &slug);

        self.out.push(Event::Start(Tag::Heading {
            level: heading.level,
            id: Some(CowStr::from(slug)),
            classes: heading.classes,
            attrs: heading.attrs,
        }));
        match self.options.anchors {
            AnchorStyle::IdOnly => self.out.extend(heading.events),
            AnchorStyle::HeaderLink => {
                self.out.push(Event::InlineHtml(CowStr::from(format!(
                    r##"<a class="header-anchor" href="#{anchor}">"##
                ))));
                self.out.extend(heading.events);
                self.out.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
            }
            AnchorStyle::LinkSymbol => {
                self.out.extend(heading.events);
                self.out.push(Event::InlineHtml(CowStr::from(format!(
                    r##" <a class="header-anchor" href="#{anchor}" aria-hidden="true">¶</a>"##
                ))));
            }
        }
        self.out.push(Event::End(TagEnd::Heading(level)));
    }
}

/// Drop trailing punctuation that is almost never part of a bare URL, and a
/// closing paren that has no opening partner inside the URL.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?', '\'', '*']);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(rest) if trimmed.matches('(').count() < trimmed.matches(')').count() => rest,
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

fn external_anchor(href: &str, title: &str) -> String {
    let mut html = String::from("<a href=\"");
    let _ = escape_href(&mut html, href);
    html.push('"');
    if !title.is_empty() {
        html.push_str(" title=\"");
        let _ = escape_html(&mut html, title);
        html.push('"');
    }
    html.push_str(r#" target="_blank" rel="noopener noreferrer">"#);
    html
}

#[cfg(feature = "syntax-highlighting")]
fn render_code(lang: Option<&str>, code: &str) -> String {
    crate::code_pretty::code_block(lang, code)
}

#[cfg(not(feature = "syntax-highlighting"))]
fn render_code(_lang: Option<&str>, code: &str) -> String {
    let mut out = String::from("<pre class=\"hljs\"><code>");
    let _ = markdown_weaver_escape::escape_html_body_text(&mut out, code);
    out.push_str("</code></pre>\n");
    out
}
