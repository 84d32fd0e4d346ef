//! Simple XHTML output for checking a conversion.
//!
//! The page lists front matter, a table of contents of the chapter names,
//! then every chapter. Special characters are written through their
//! ready-made HTML form; corrections are left out of the page and only
//! reported at trace level.

use crate::common::xml::escape_xml;
use crate::common::{Error, Metadata, Result};
use crate::model::{Chapter, Div, DivKind, Image, Node, Span, SpanKind, TableRow};
use std::fmt::Write as FmtWrite;

const DOCTYPE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
  <head>
"#;

/// Callback receiving every image the page references.
pub type ImageSink<'s> = dyn FnMut(&Image) -> Result<()> + 's;

/// Writer for the check page.
///
/// # Examples
///
/// ```rust
/// use quire::common::Metadata;
/// use quire::model::{Div, Node, Span, StyleRef};
/// use quire::render::HtmlWriter;
///
/// # fn main() -> quire::Result<()> {
/// let para = Div::paragraph(StyleRef::block(), None)
///     .with_span(Span::text_run("a < b", StyleRef::text(), None));
/// let chapter: Node = Div::chapter(1, "Chapter 1", vec![para.into()]).into();
///
/// let mut writer = HtmlWriter::new();
/// writer.write_document(Some(&Metadata::default()), &[chapter])?;
/// let html = writer.into_string();
/// assert!(html.contains("<span>a &lt; b</span>"));
/// # Ok(())
/// # }
/// ```
pub struct HtmlWriter<'s> {
    buffer: String,
    images: Option<&'s mut ImageSink<'s>>,
}

impl Default for HtmlWriter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> HtmlWriter<'s> {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096),
            images: None,
        }
    }

    /// Hand every image to `sink` as it is written, e.g. to copy the bytes
    /// next to the page.
    pub fn with_image_sink(mut self, sink: &'s mut ImageSink<'s>) -> Self {
        self.images = Some(sink);
        self
    }

    /// Write a whole page.
    ///
    /// Nodes before the first chapter are front matter. Once chapters
    /// start, any other top-level node is a [`Error::Structure`] error.
    pub fn write_document(&mut self, metadata: Option<&Metadata>, nodes: &[Node]) -> Result<()> {
        let mut front = Vec::new();
        let mut chapters = Vec::new();
        for node in nodes {
            match node.as_div().and_then(Div::as_chapter) {
                Some(chapter) => chapters.push(chapter),
                None if chapters.is_empty() => front.push(node),
                None => {
                    return Err(Error::Structure(
                        "only chapters may follow the first chapter".to_string(),
                    ));
                },
            }
        }

        match metadata {
            Some(metadata) => self.write_metadata(metadata)?,
            None => self.write_generic_header(),
        }
        for node in front {
            self.write_node(node)?;
        }
        self.write_toc(&chapters)?;
        for chapter in chapters {
            self.write_chapter(chapter)?;
        }
        self.buffer.push_str("  </body>\n</html>\n");
        Ok(())
    }

    fn write_metadata(&mut self, metadata: &Metadata) -> Result<()> {
        let title = escape_xml(&metadata.title);
        self.buffer.push_str(DOCTYPE);
        writeln!(
            self.buffer,
            "    <title>{title}</title>\n    <meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" />\n  </head>\n  <body>\n    <h1>{title}</h1>"
        )
        .map_err(|e| Error::Other(e.to_string()))?;
        writeln!(self.buffer, "    <h2>By {}</h2>", escape_xml(&metadata.author()))
            .map_err(|e| Error::Other(e.to_string()))?;
        for subtitle in &metadata.subtitles {
            writeln!(self.buffer, "    <h2>{}</h2>", escape_xml(subtitle))
                .map_err(|e| Error::Other(e.to_string()))?;
        }
        if !metadata.description.is_empty() {
            writeln!(self.buffer, "    <h2>{}</h2>", escape_xml(&metadata.description))
                .map_err(|e| Error::Other(e.to_string()))?;
        }
        writeln!(
            self.buffer,
            "    <h3>&copy; {} {} / {}</h3>",
            escape_xml(&metadata.year),
            escape_xml(&metadata.isbn_10),
            escape_xml(&metadata.isbn_13)
        )
        .map_err(|e| Error::Other(e.to_string()))?;
        Ok(())
    }

    fn write_generic_header(&mut self) {
        self.buffer.push_str(DOCTYPE);
        self.buffer.push_str(
            "    <title>A Book</title>\n    <meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" />\n  </head>\n  <body>\n    <h1>A Book</h1>\n",
        );
    }

    fn write_toc(&mut self, chapters: &[&Chapter]) -> Result<()> {
        self.buffer.push_str("    <h4>Table of Contents</h4>\n    <ol>\n");
        for chapter in chapters {
            let name = escape_xml(&chapter.name);
            writeln!(self.buffer, "      <li><a href='#{name}'>{name}</a></li>")
                .map_err(|e| Error::Other(e.to_string()))?;
        }
        self.buffer.push_str("    </ol>\n");
        Ok(())
    }

    fn write_chapter(&mut self, chapter: &Chapter) -> Result<()> {
        let name = escape_xml(&chapter.name);
        writeln!(self.buffer, "    <h4><a name='{name}'>{name}</a></h4>")
            .map_err(|e| Error::Other(e.to_string()))?;
        for child in &chapter.children {
            self.write_node(child)?;
        }
        Ok(())
    }

    /// Write one block or inline node.
    pub fn write_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Div(div) => self.write_div(div),
            Node::Span(span) => self.write_span(span),
        }
    }

    fn write_div(&mut self, div: &Div) -> Result<()> {
        match &div.kind {
            DivKind::Paragraph(spans) => {
                self.buffer.push_str("    <p>");
                for span in spans {
                    self.write_span(span)?;
                }
                self.buffer.push_str("</p>\n");
            },
            DivKind::SideBar(children) => {
                self.buffer.push_str("    <div>\n");
                for child in children {
                    self.write_node(child)?;
                }
                self.buffer.push_str("    </div>\n");
            },
            DivKind::SeparatorLine => self.buffer.push_str("    <center>* * *</center>\n"),
            DivKind::Table(table) => {
                self.buffer.push_str("    <table>\n");
                if let Some(header) = &table.header {
                    self.write_row(header, "th")?;
                }
                for row in &table.rows {
                    self.write_row(row, "td")?;
                }
                self.buffer.push_str("    </table>\n");
            },
            DivKind::TableRow(row) => self.write_row(row, "td")?,
            DivKind::Chapter(chapter) => self.write_chapter(chapter)?,
        }
        Ok(())
    }

    fn write_row(&mut self, row: &TableRow, cell_tag: &str) -> Result<()> {
        self.buffer.push_str("      <tr>");
        for cell in &row.cells {
            write!(self.buffer, "<{cell_tag}>").map_err(|e| Error::Other(e.to_string()))?;
            for span in cell.spans().unwrap_or_default() {
                self.write_span(span)?;
            }
            write!(self.buffer, "</{cell_tag}>").map_err(|e| Error::Other(e.to_string()))?;
        }
        self.buffer.push_str("</tr>\n");
        Ok(())
    }

    /// Write one inline node.
    pub fn write_span(&mut self, span: &Span) -> Result<()> {
        match &span.kind {
            SpanKind::Text(text) => {
                self.buffer.push_str("<span>");
                self.buffer.push_str(&escape_xml(text));
                self.buffer.push_str("</span>");
            },
            SpanKind::Special(special) => {
                self.buffer.push_str("<span>");
                self.buffer.push_str(&special.html);
                self.buffer.push_str("</span>");
            },
            SpanKind::Correction(original) => {
                log::trace!("correction: was originally [{}]", original);
            },
            SpanKind::Image(image) => {
                if let Some(sink) = self.images.as_deref_mut() {
                    sink(image)?;
                }
                writeln!(self.buffer, "    <img src='{}' />", escape_xml(image.path()))
                    .map_err(|e| Error::Other(e.to_string()))?;
            },
        }
        Ok(())
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

/// Render a page without saving images.
pub fn to_html(metadata: Option<&Metadata>, nodes: &[Node]) -> Result<String> {
    let mut writer = HtmlWriter::new();
    writer.write_document(metadata, nodes)?;
    Ok(writer.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Source, StyleRef};
    use crate::odf::core::fixture::PackageBuilder;
    use std::sync::Arc;

    fn para(spans: Vec<Span>) -> Node {
        spans
            .into_iter()
            .fold(Div::paragraph(StyleRef::block(), None), Div::with_span)
            .into()
    }

    #[test]
    fn test_page_layout() {
        let metadata = Metadata {
            title: "Tom & Jerry".to_string(),
            author_first: "Jane".to_string(),
            author_last: "Public".to_string(),
            year: "2021".to_string(),
            ..Default::default()
        };
        let nodes = vec![
            para(vec![Span::text_run("Front", StyleRef::text(), None)]),
            Div::chapter(
                1,
                "Chapter 1",
                vec![
                    para(vec![
                        Span::correction("\"", StyleRef::text(), None),
                        Span::special("\u{201C}", "&ldquo;", false, StyleRef::text(), None),
                        Span::text_run("x<y", StyleRef::text(), None),
                    ]),
                    Div::separator_line(Some(Source::new("text:p", 2))).into(),
                ],
            )
            .into(),
        ];
        let html = to_html(Some(&metadata), &nodes).unwrap();
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains("<h2>By Jane Public</h2>"));
        assert!(html.contains("<li><a href='#Chapter 1'>Chapter 1</a></li>"));
        assert!(html.contains("<p><span>&ldquo;</span><span>x&lt;y</span></p>"));
        assert!(html.contains("<center>* * *</center>"));
        assert!(html.find("Front").unwrap() < html.find("Table of Contents").unwrap());
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_generic_header() {
        let html = to_html(None, &[]).unwrap();
        assert!(html.contains("<h1>A Book</h1>"));
    }

    #[test]
    fn test_content_after_chapters_rejected() {
        let nodes = vec![
            Div::chapter(1, "Chapter 1", vec![]).into(),
            para(vec![Span::text_run("stray", StyleRef::text(), None)]),
        ];
        assert!(matches!(to_html(None, &nodes), Err(Error::Structure(_))));
    }

    #[test]
    fn test_images_go_to_sink() {
        let package = PackageBuilder::odt()
            .file("Pictures/cover.gif", b"GIF89a".to_vec())
            .package();
        let image = Image::new("Pictures/cover.gif", Arc::clone(&package)).unwrap();
        let side_bar = Div::side_bar(
            vec![Span::image(image, StyleRef::block(), None).into()],
            StyleRef::block(),
            None,
        );

        let mut saved = Vec::new();
        let mut sink = |image: &Image| -> Result<()> {
            saved.push((image.file_name().to_string(), image.bytes()?));
            Ok(())
        };
        let mut writer = HtmlWriter::new().with_image_sink(&mut sink);
        writer.write_node(&side_bar.into()).unwrap();
        let html = writer.into_string();

        assert!(html.contains("<img src='Pictures/cover.gif' />"));
        assert_eq!(saved, vec![("cover.gif".to_string(), b"GIF89a".to_vec())]);
    }
}
