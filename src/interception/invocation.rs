//! Description of an intercepted call.

use std::fmt;

use axum::body::Bytes;

use crate::interception::json::ToJson;

/// A file received as part of a multipart upload.
///
/// Uploads are never rendered into log lines, so this type deliberately has
/// no `Serialize` impl.
#[derive(Clone)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(field_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: None,
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// One argument of an intercepted call.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Json(&'a dyn ToJson),
    Upload(&'a UploadedFile),
}

impl Arg<'_> {
    pub fn is_upload(&self) -> bool {
        matches!(self, Arg::Upload(_))
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Json(_) => f.write_str("Arg::Json(..)"),
            Arg::Upload(file) => f.debug_tuple("Arg::Upload").field(file).finish(),
        }
    }
}

/// The call being intercepted: who receives it, which method, which arguments.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    receiver: &'static str,
    declaring_type: &'static str,
    method: &'static str,
    args: Vec<Arg<'a>>,
}

impl<'a> Invocation<'a> {
    /// Invocation of `method` on a value of type `T`.
    pub fn of<T: ?Sized>(method: &'static str) -> Self {
        Self::named(std::any::type_name::<T>(), method)
    }

    /// Invocation of `method` on a receiver identified by name.
    pub fn named(receiver: &'static str, method: &'static str) -> Self {
        Self {
            receiver,
            declaring_type: simple_name(receiver),
            method,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: &'a dyn ToJson) -> Self {
        self.args.push(Arg::Json(value));
        self
    }

    pub fn upload(mut self, file: &'a UploadedFile) -> Self {
        self.args.push(Arg::Upload(file));
        self
    }

    pub fn receiver(&self) -> &'static str {
        self.receiver
    }

    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn args(&self) -> &[Arg<'a>] {
        &self.args
    }
}

/// Last path segment of a type name, without generic parameters.
pub fn simple_name(type_name: &'static str) -> &'static str {
    let base = match type_name.find('<') {
        Some(idx) => &type_name[..idx],
        None => type_name,
    };
    match base.rfind("::") {
        Some(idx) => &base[idx + 2..],
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UserController;

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("crate::demo::UserController"), "UserController");
        assert_eq!(simple_name("Plain"), "Plain");
        assert_eq!(simple_name("a::Wrapper<b::Inner>"), "Wrapper");
    }

    #[test]
    fn test_invocation_of_type() {
        let inv = Invocation::of::<UserController>("create_user");
        assert!(inv.receiver().ends_with("UserController"));
        assert!(inv.receiver().contains("::"));
        assert_eq!(inv.declaring_type(), "UserController");
        assert_eq!(inv.method(), "create_user");
        assert!(inv.args().is_empty());
    }

    #[test]
    fn test_args_keep_order() {
        let name = "ada".to_string();
        let file = UploadedFile::new("file", vec![1u8, 2, 3]).with_file_name("a.bin");
        let age = 36u32;
        let inv = Invocation::named("Svc", "call")
            .arg(&name)
            .upload(&file)
            .arg(&age);
        let kinds: Vec<bool> = inv.args().iter().map(Arg::is_upload).collect();
        assert_eq!(kinds, vec![false, true, false]);
    }

    #[test]
    fn test_upload_debug_hides_content() {
        let file = UploadedFile::new("file", b"secret".to_vec());
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 6"));
        assert!(!debug.contains("secret"));
        assert_eq!(file.len(), 6);
        assert!(!file.is_empty());
    }
}
