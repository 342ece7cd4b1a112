//! # TEI Serialization
//!
//! Writes a [`Document`] as a TEI XML file. Structural elements are indented;
//! line content is written inline since it is mixed content.

use std::io::{Cursor, Write};

use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::{Deserialize, Serialize};

use crate::content::{ContentNode, Element};
use crate::parsing::{Block, BlockItem, BlockKind, BodyItem, Document, Line, Milestone, MilestoneKind};

pub const TEI_NAMESPACE: &str = "http://www.tei-c.org/ns/1.0";

const INDENT: usize = 2;

/// Edition value of a page break in the base edition.
pub const BASE_EDITION: &str = "base";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeiOptions {
    /// Text of `teiHeader/fileDesc/titleStmt/title`.
    pub title: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TeiError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialized document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a document to a complete TEI file
pub fn to_tei_string(doc: &Document, options: &TeiOptions) -> Result<String, TeiError> {
    let mut w = TeiWriter::new(Cursor::new(Vec::new()));

    w.writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.open("TEI", &[("xmlns", TEI_NAMESPACE)])?;
    write_header(&mut w, options)?;

    w.open("text", &[])?;
    w.open("body", &[])?;
    w.open("div", &[])?;
    for item in &doc.body {
        match item {
            BodyItem::Milestone(m) => write_milestone(&mut w, m)?,
            BodyItem::Block(b) => write_block(&mut w, doc, b)?,
        }
    }
    w.close("div")?;
    w.close("body")?;
    w.close("text")?;
    w.close("TEI")?;

    let bytes = w.finish()?.into_inner();
    Ok(String::from_utf8(bytes)?)
}

/// Serialize a single line element, as it appears in the body
pub fn line_to_xml(line: &Line) -> Result<String, TeiError> {
    let mut w = TeiWriter::new(Cursor::new(Vec::new()));
    write_line_element(&mut w.writer, line)?;
    Ok(String::from_utf8(w.writer.into_inner().into_inner())?)
}

/// Writer that indents structural elements by nesting depth.
struct TeiWriter<W: Write> {
    writer: Writer<W>,
    depth: usize,
}

impl<W: Write> TeiWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
            depth: 0,
        }
    }

    fn newline(&mut self) -> Result<(), TeiError> {
        let pad = format!("\n{}", " ".repeat(self.depth * INDENT));
        self.writer.write_event(Event::Text(BytesText::new(&pad)))?;
        Ok(())
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), TeiError> {
        self.newline()?;
        self.writer.write_event(Event::Start(start(name, attrs)))?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), TeiError> {
        self.depth = self.depth.saturating_sub(1);
        self.newline()?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), TeiError> {
        self.newline()?;
        self.writer.write_event(Event::Empty(start(name, attrs)))?;
        Ok(())
    }

    fn leaf(&mut self, name: &str, text: &str) -> Result<(), TeiError> {
        self.newline()?;
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        if !text.is_empty() {
            self.writer.write_event(Event::Text(text_event(text)))?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn finish(mut self) -> Result<W, TeiError> {
        self.writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(self.writer.into_inner())
    }
}

/// Text with markup characters escaped; apostrophes and quotes stay as typed.
fn text_event(text: &str) -> BytesText<'_> {
    BytesText::from_escaped(partial_escape(text))
}

fn start<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    elem
}

fn write_header<W: Write>(w: &mut TeiWriter<W>, options: &TeiOptions) -> Result<(), TeiError> {
    w.open("teiHeader", &[])?;
    w.open("fileDesc", &[])?;

    w.open("titleStmt", &[])?;
    w.leaf("title", &options.title)?;
    w.close("titleStmt")?;

    w.open("publicationStmt", &[])?;
    w.leaf("p", "")?;
    w.close("publicationStmt")?;

    w.open("sourceDesc", &[])?;
    w.leaf("p", "")?;
    w.close("sourceDesc")?;

    w.close("fileDesc")?;
    w.close("teiHeader")
}

fn write_milestone<W: Write>(w: &mut TeiWriter<W>, m: &Milestone) -> Result<(), TeiError> {
    let ed = match m.kind {
        MilestoneKind::Page => BASE_EDITION,
        MilestoneKind::Folio => crate::content::elements::FOLIO_EDITION,
    };
    w.empty("pb", &[("ed", ed), ("n", m.label.as_str())])
}

fn write_block<W: Write>(w: &mut TeiWriter<W>, doc: &Document, block: &Block) -> Result<(), TeiError> {
    let name = match block.kind {
        BlockKind::Stanza => "lg",
        BlockKind::Paragraph => "p",
    };
    let numbered = [("n", block.numeral.as_str())];
    let attrs: &[(&str, &str)] = if block.numbered { &numbered } else { &[] };
    w.open(name, attrs)?;

    for item in &block.items {
        match item {
            BlockItem::Milestone(m) => write_milestone(w, m)?,
            BlockItem::Line(id) => {
                if let Some(line) = doc.line(*id) {
                    w.newline()?;
                    write_line_element(&mut w.writer, line)?;
                }
            }
        }
    }

    w.close(name)
}

fn write_line_element<W: Write>(writer: &mut Writer<W>, line: &Line) -> Result<(), TeiError> {
    let id = line.id.to_string();
    let n = line.page_relative_index.map(|n| n.to_string());

    let mut elem = BytesStart::new("l");
    if let Some(n) = &n {
        elem.push_attribute(("n", n.as_str()));
    }
    elem.push_attribute(("xml:id", id.as_str()));
    writer.write_event(Event::Start(elem))?;

    for node in line.content.nodes() {
        write_node(writer, node)?;
    }

    writer.write_event(Event::End(BytesEnd::new("l")))?;
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &ContentNode) -> Result<(), TeiError> {
    match node {
        ContentNode::Text(t) => {
            writer.write_event(Event::Text(text_event(t)))?;
        }
        ContentNode::Element(e) => write_element(writer, e)?,
    }
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, e: &Element) -> Result<(), TeiError> {
    let mut elem = BytesStart::new(e.name.as_str());
    for (key, value) in &e.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if e.children.is_empty() {
        writer.write_event(Event::Empty(elem))?;
        return Ok(());
    }

    writer.write_event(Event::Start(elem))?;
    for child in &e.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(e.name.as_str())))?;
    Ok(())
}
