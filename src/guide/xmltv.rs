//! XMLTV document builder
//!
//! Channels and programs are collected as values and written in one pass
//! with the quick-xml writer: channels first, in first-seen order, then
//! programs in insertion order.

use std::collections::HashSet;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use crate::error::{GrabError, Result};
use crate::models::{Channel, Program};

pub const GENERATOR_NAME: &str = "tv_grab_fr_telerama";
pub const SOURCE_NAME: &str = "Télérama";
pub const SOURCE_URL: &str = "http://guidetv-iphone.telerama.fr/";

/// XMLTV timestamp layout
const TIME_FORMAT: &str = "%Y%m%d%H%M%S %z";

/// In-memory XMLTV document
#[derive(Debug, Clone, Default)]
pub struct XmltvDocument {
    channels: Vec<Channel>,
    channel_ids: HashSet<String>,
    programs: Vec<Program>,
}

impl XmltvDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a channel; later declarations of the same id are ignored
    pub fn add_channel(&mut self, channel: Channel) {
        if self.channel_ids.insert(channel.id.clone()) {
            self.channels.push(channel);
        }
    }

    pub fn add_program(&mut self, program: Program) {
        self.programs.push(program);
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Render the document as a UTF-8 string
    pub fn serialize(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| GrabError::Xml(e.to_string()))
    }

    /// Write the document to any sink
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("tv");
        root.push_attribute(("generator-info-name", GENERATOR_NAME));
        root.push_attribute(("source-info-name", SOURCE_NAME));
        root.push_attribute(("source-info-url", SOURCE_URL));
        emit(&mut writer, Event::Start(root))?;

        for channel in &self.channels {
            write_channel(&mut writer, channel)?;
        }
        for program in &self.programs {
            write_program(&mut writer, program)?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("tv")))?;

        let mut out = writer.into_inner();
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| GrabError::Xml(e.to_string()))
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    emit(writer, Event::Start(elem))
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// `<name attrs>text</name>`
fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
    start(writer, name, attrs)?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

/// `<name attrs/>`
fn empty_element<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    emit(writer, Event::Empty(elem))
}

fn write_channel<W: Write>(writer: &mut Writer<W>, channel: &Channel) -> Result<()> {
    start(writer, "channel", &[("id", channel.id.as_str())])?;
    text_element(writer, "display-name", &[], &channel.display_name)?;
    end(writer, "channel")
}

fn write_program<W: Write>(writer: &mut Writer<W>, program: &Program) -> Result<()> {
    let start_time = program.start.format(TIME_FORMAT).to_string();
    let stop_time = program.stop.format(TIME_FORMAT).to_string();

    let mut attrs: Vec<(&str, &str)> = vec![
        ("start", start_time.as_str()),
        ("stop", stop_time.as_str()),
        ("channel", program.channel.id.as_str()),
    ];
    if let Some(ref showview) = program.showview {
        attrs.push(("showview", showview.as_str()));
    }
    start(writer, "programme", &attrs)?;

    text_element(writer, "title", &[], &program.title)?;
    if let Some(ref sub_title) = program.sub_title {
        text_element(writer, "sub-title", &[], sub_title)?;
    }
    if let Some(ref desc) = program.description {
        text_element(writer, "desc", &[], desc)?;
    }

    if !program.credits.is_empty() {
        let credits = &program.credits;
        start(writer, "credits", &[])?;
        for name in &credits.directors {
            text_element(writer, "director", &[], name)?;
        }
        for actor in &credits.actors {
            match actor.role {
                Some(ref role) => text_element(writer, "actor", &[("role", role.as_str())], &actor.name)?,
                None => text_element(writer, "actor", &[], &actor.name)?,
            }
        }
        for name in &credits.composers {
            text_element(writer, "composer", &[], name)?;
        }
        for name in &credits.presenters {
            text_element(writer, "presenter", &[], name)?;
        }
        for name in &credits.guests {
            text_element(writer, "guest", &[], name)?;
        }
        end(writer, "credits")?;
    }

    if let Some(ref year) = program.year {
        text_element(writer, "date", &[], year)?;
    }

    for category in &program.categories {
        match category.lang {
            Some(lang) => text_element(writer, "category", &[("lang", lang)], &category.name)?,
            None => text_element(writer, "category", &[], &category.name)?,
        }
    }

    empty_element(writer, "icon", &[("src", program.icon.as_str())])?;

    if let Some(episode) = &program.episode_num {
        text_element(writer, "episode-num", &[("system", "xmltv_ns")], &episode.xmltv_ns())?;
    }

    if !program.video.is_empty() {
        start(writer, "video", &[])?;
        if let Some(aspect) = program.video.aspect {
            text_element(writer, "aspect", &[], aspect.as_str())?;
        }
        if program.video.hd {
            text_element(writer, "quality", &[], "HDTV")?;
        }
        end(writer, "video")?;
    }

    if let Some(audio) = program.audio {
        start(writer, "audio", &[])?;
        text_element(writer, "stereo", &[], audio.as_str())?;
        end(writer, "audio")?;
    }

    if program.previously_shown {
        empty_element(writer, "previously-shown", &[])?;
    }

    if let Some(ref premiere) = program.premiere {
        text_element(writer, "premiere", &[("lang", "fr")], premiere)?;
    }

    if let Some(subtitles) = program.subtitles {
        empty_element(writer, "subtitles", &[("type", subtitles.as_str())])?;
    }

    if let Some(ref rating) = program.rating {
        start(writer, "rating", &[])?;
        text_element(writer, "value", &[], rating)?;
        end(writer, "rating")?;
    }

    if let Some(stars) = program.star_rating {
        start(writer, "star-rating", &[])?;
        text_element(writer, "value", &[], &format!("{}/3", stars))?;
        end(writer, "star-rating")?;
    }

    if let Some(ref review) = program.review {
        text_element(writer, "review", &[("type", "text"), ("lang", "fr")], review)?;
    }

    end(writer, "programme")
}
