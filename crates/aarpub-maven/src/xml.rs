//! Small indenting XML writer shared by the POM and metadata renderers.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use aarpub_util::errors::AarpubError;

pub(crate) struct XmlDoc {
    writer: Writer<Vec<u8>>,
}

impl XmlDoc {
    pub(crate) fn new() -> miette::Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;
        Ok(Self { writer })
    }

    pub(crate) fn start(&mut self, name: &str) -> miette::Result<&mut Self> {
        self.start_with_attrs(name, &[])
    }

    pub(crate) fn start_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> miette::Result<&mut Self> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        self.writer
            .write_event(Event::Start(start))
            .map_err(xml_err)?;
        Ok(self)
    }

    pub(crate) fn end(&mut self, name: &str) -> miette::Result<&mut Self> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)?;
        Ok(self)
    }

    /// `<name>value</name>`, with `value` escaped.
    pub(crate) fn text(&mut self, name: &str, value: &str) -> miette::Result<&mut Self> {
        self.start(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(xml_err)?;
        self.end(name)
    }

    pub(crate) fn finish(self) -> String {
        let mut out = String::from_utf8_lossy(&self.writer.into_inner()).to_string();
        out.push('\n');
        out
    }
}

fn xml_err(e: impl std::fmt::Display) -> AarpubError {
    AarpubError::Generic {
        message: format!("Failed to write XML: {e}"),
    }
}
