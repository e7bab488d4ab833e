use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body accepted by `POST /send-message`.
#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    pub text: Option<String>,
    pub web_url: Option<String>,
    pub mobile_web_url: Option<String>,
    #[serde(rename = "btnTitle")]
    pub button_title: Option<String>,
}

impl SendMessageRequest {
    /// Parses the raw request body. An empty body reads as an empty object.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// Converts into a text template, or `None` when `text` is missing or empty.
    pub fn into_template(self) -> Option<TextTemplate> {
        let text = self.text.filter(|text| !text.is_empty())?;

        Some(TextTemplate {
            object_type: "text",
            text,
            link: Link {
                web_url: self.web_url,
                mobile_web_url: self.mobile_web_url,
            },
            button_title: self.button_title,
        })
    }
}

/// Kakao "text" message template, sent as the `template_object` form field.
#[derive(Debug)]
pub struct TextTemplate {
    pub object_type: &'static str,
    pub text: String,
    pub link: Link,
    pub button_title: Option<String>,
}

#[derive(Debug)]
pub struct Link {
    pub web_url: Option<String>,
    pub mobile_web_url: Option<String>,
}

impl TextTemplate {
    /// JSON object for the `template_object` field. Absent optional fields are
    /// left out; `link` is always present.
    pub fn to_value(&self) -> Value {
        let mut link = Map::new();
        if let Some(mobile_web_url) = &self.link.mobile_web_url {
            link.insert("mobile_web_url".to_string(), Value::from(mobile_web_url.as_str()));
        }
        if let Some(web_url) = &self.link.web_url {
            link.insert("web_url".to_string(), Value::from(web_url.as_str()));
        }

        // Keys go in sorted order so the encoding is the same with or without
        // serde_json's `preserve_order`.
        let mut object = Map::new();
        if let Some(button_title) = &self.button_title {
            object.insert("button_title".to_string(), Value::from(button_title.as_str()));
        }
        object.insert("link".to_string(), Value::Object(link));
        object.insert("object_type".to_string(), Value::from(self.object_type));
        object.insert("text".to_string(), Value::from(self.text.as_str()));

        Value::Object(object)
    }

    pub fn to_template_object(&self) -> String {
        self.to_value().to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageSent {
    pub success: bool,
    pub data: Value,
}
