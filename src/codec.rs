use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

use super::{ErrorKind, Result, ResultExt};

/// Binary (json) encoding of a model
///
/// Both methods have default implementations for any serde model;
/// implementors only name the model for error reporting.
pub trait Binary: Serialize + DeserializeOwned {
    /// Schema name of the model
    const NAME: &'static str;

    /// Encode the model as json bytes
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        trace!("encoding {}", Self::NAME);
        let mut data = Vec::with_capacity(128);
        let mut ser = Serializer::with_formatter(&mut data, GoFormatter);
        self.serialize(&mut ser)
            .chain_err(|| ErrorKind::Encoding(Self::NAME.into()))?;
        Ok(data)
    }

    /// Replace the model with one decoded from json bytes
    ///
    /// The receiver is only overwritten once decoding has fully succeeded;
    /// on error it is left as it was.
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        trace!("decoding {} from {} bytes", Self::NAME, data.len());
        let res: Self =
            serde_json::from_slice(data).chain_err(|| ErrorKind::Decoding(Self::NAME.into()))?;
        *self = res;
        Ok(())
    }
}

/// Compact json written the way other producers of these documents write it
///
/// Floats use the shortest representation, in plain decimal form when the
/// magnitude is in [1e-6, 1e21) and with a signed exponent otherwise
/// (`10`, `-0`, `100000000000000000`, `1e+21`, `1e-7`).
/// `<`, `>`, `&`, U+2028 and U+2029 inside strings are written as `\u` escapes.
struct GoFormatter;

fn go_float(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && (abs < 1e-6 || abs >= 1e21) {
        let s = format!("{:e}", value);
        match s.find('e') {
            Some(i) if !s[i + 1..].starts_with('-') => format!("{}e+{}", &s[..i], &s[i + 1..]),
            _ => s,
        }
    } else {
        // Display never uses an exponent and keeps the sign of -0
        format!("{}", value)
    }
}

impl Formatter for GoFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(go_float(value).as_bytes())
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(go_float(f64::from(value)).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Encode a possibly absent model
///
/// An absent model encodes to no bytes at all.
pub fn marshal_binary<T: Binary>(model: Option<&T>) -> Result<Vec<u8>> {
    match model {
        Some(m) => m.marshal_binary(),
        None => Ok(vec![]),
    }
}

/// Encode a model as a yaml document
pub fn to_yaml<T: Binary>(model: &T) -> Result<String> {
    let data = serde_yaml::to_string(model).chain_err(|| ErrorKind::Encoding(T::NAME.into()))?;
    Ok(data)
}

/// Decode a model from a yaml document
pub fn from_yaml<T: Binary>(data: &str) -> Result<T> {
    let res = serde_yaml::from_str(data).chain_err(|| ErrorKind::Decoding(T::NAME.into()))?;
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::{from_yaml, go_float, marshal_binary, to_yaml, Binary};
    use crate::ErrorKind;

    #[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
    struct Volume {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u32>,
    }
    impl Binary for Volume {
        const NAME: &'static str = "volume";
    }

    #[test]
    fn absent_model_is_empty() {
        let data = marshal_binary::<Volume>(None).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn unmarshal_replaces_wholesale() {
        let mut v = Volume { name: "data".into(), size: Some(3) };
        v.unmarshal_binary(br#"{"size":5}"#).unwrap();
        assert_eq!(v, Volume { name: "".into(), size: Some(5) });
    }

    #[test]
    fn failed_unmarshal_keeps_receiver() {
        let mut v = Volume { name: "data".into(), size: Some(3) };
        let err = v.unmarshal_binary(br#"{"name":"other","size":"big"}"#).unwrap_err();
        match err.kind() {
            ErrorKind::Decoding(m) => assert_eq!(m, "volume"),
            _ => panic!("unexpected error kind"),
        }
        assert_eq!(v, Volume { name: "data".into(), size: Some(3) });
        assert!(v.unmarshal_binary(b"").is_err());
        assert_eq!(v.name, "data");
    }

    #[test]
    fn yaml_documents() {
        let v: Volume = from_yaml("name: data\nsize: 10").unwrap();
        assert_eq!(v.size, Some(10));
        let out = to_yaml(&v).unwrap();
        assert!(out.contains("name: data"));
        assert!(from_yaml::<Volume>("name: [1, 2]").is_err());
    }

    #[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
    struct Claim {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        class: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f64>,
    }
    impl Binary for Claim {
        const NAME: &'static str = "claim";
    }

    fn encoded(size: f64) -> String {
        let c = Claim { class: "".into(), size: Some(size) };
        String::from_utf8(c.marshal_binary().unwrap()).unwrap()
    }

    #[test]
    fn float_formatting() {
        assert_eq!(go_float(10.0), "10");
        assert_eq!(go_float(2.75), "2.75");
        assert_eq!(go_float(0.0), "0");
        assert_eq!(go_float(-0.0), "-0");
        assert_eq!(go_float(0.000001), "0.000001");
        assert_eq!(go_float(1e-7), "1e-7");
        assert_eq!(go_float(1e17), "100000000000000000");
        assert_eq!(go_float(1.2345678901234568e20), "123456789012345680000");
        assert_eq!(go_float(1e21), "1e+21");
        assert_eq!(go_float(-2.5e22), "-2.5e+22");
    }

    #[test]
    fn large_and_signed_sizes() {
        assert_eq!(encoded(1e17), r#"{"size":100000000000000000}"#);
        assert_eq!(encoded(1.2345678901234568e20), r#"{"size":123456789012345680000}"#);
        assert_eq!(encoded(1e21), r#"{"size":1e+21}"#);
        assert_eq!(encoded(-0.0), r#"{"size":-0}"#);

        for n in vec![1e17, 1.2345678901234568e20, 1e21, 1e-7, -0.0] {
            let mut c = Claim::default();
            c.unmarshal_binary(encoded(n).as_bytes()).unwrap();
            let back = c.size.unwrap();
            assert_eq!(back, n);
            assert_eq!(back.is_sign_negative(), n.is_sign_negative());
        }
    }

    #[test]
    fn html_characters_escaped() {
        let c = Claim { class: "a<b>&c\u{2028}".into(), size: None };
        let out = String::from_utf8(c.marshal_binary().unwrap()).unwrap();
        assert_eq!(out, r#"{"class":"a\u003cb\u003e\u0026c\u2028"}"#);
        let mut back = Claim::default();
        back.unmarshal_binary(out.as_bytes()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn duplicate_keys_rejected() {
        let mut v = Volume { name: "data".into(), size: None };
        let err = v.unmarshal_binary(br#"{"name":"a","name":"b"}"#).unwrap_err();
        match err.kind() {
            ErrorKind::Decoding(m) => assert_eq!(m, "volume"),
            _ => panic!("unexpected error kind"),
        }
        assert_eq!(v.name, "data");
    }
}
