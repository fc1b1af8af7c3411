//! Server-side rendering of the single question page.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Bootstrap-style alert level, matching the classes used in the page CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Danger,
}

impl Level {
    fn class(self) -> &'static str {
        match self {
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: Level::Danger,
            message: message.into(),
        }
    }
}

/// Outcome of a submitted question.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub original: String,
    pub processed: String,
    pub tokens: Vec<String>,
    pub answer: Option<String>,
}

/// Everything one render needs. Built per request.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub model: String,
    pub question: String,
    pub notice: Option<Notice>,
    pub outcome: Option<Outcome>,
}

impl PageView {
    pub fn blank(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
textarea{width:100%;min-height:6rem}\
.alert{padding:.75rem 1rem;border-radius:.25rem;margin:1rem 0}\
.alert-warning{background:#fff3cd}.alert-danger{background:#f8d7da}\
.token{display:inline-block;background:#eee;border-radius:.25rem;padding:0 .4rem;margin:0 .2rem .2rem 0}\
pre{white-space:pre-wrap}";

pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>LLM Q&amp;A</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<h1>LLM Q&amp;A</h1>\n");

    if let Some(notice) = &view.notice {
        html.push_str(&format!(
            "<div class=\"alert alert-{}\" role=\"alert\">{}</div>\n",
            notice.level.class(),
            encode_text(&notice.message)
        ));
    }

    html.push_str(&render_form(view));

    if let Some(outcome) = &view.outcome {
        html.push_str(&render_outcome(outcome, &view.model));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(view: &PageView) -> String {
    format!(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"question\">Question</label>\n\
         <textarea id=\"question\" name=\"question\">{}</textarea>\n\
         <label for=\"model\">Model</label>\n\
         <input id=\"model\" name=\"model\" type=\"text\" value=\"{}\">\n\
         <button type=\"submit\">Ask</button>\n\
         </form>\n",
        encode_text(&view.question),
        encode_double_quoted_attribute(&view.model)
    )
}

fn render_outcome(outcome: &Outcome, model: &str) -> String {
    let tokens: String = outcome
        .tokens
        .iter()
        .map(|token| format!("<span class=\"token\">{}</span>", encode_text(token)))
        .collect();

    let answer = outcome
        .answer
        .as_ref()
        .map(|answer| {
            format!(
                "<h2>Answer <small>({})</small></h2>\n<pre id=\"answer\">{}</pre>\n",
                encode_text(model),
                encode_text(answer)
            )
        })
        .unwrap_or_default();

    format!(
        "<section id=\"result\">\n\
         <h2>Original question</h2>\n<p id=\"original\">{}</p>\n\
         <h2>Processed question</h2>\n<p id=\"processed\">{}</p>\n\
         <h2>Tokens</h2>\n<p id=\"tokens\">{tokens}</p>\n\
         {answer}\
         </section>\n",
        encode_text(&outcome.original),
        encode_text(&outcome.processed),
    )
}
