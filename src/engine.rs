//! Path engine - the main entry point for document queries
//!
//! The engine resolves a [`Path`] against a [`Document`] by walking the
//! segments from the root mapping. Resolution failures are classified as
//! [`ErrorKind::InvalidPath`](crate::ErrorKind::InvalidPath) and, depending
//! on [`EngineOptions::throw_on_missing`], either returned as errors or
//! turned into `None`. Type mismatches are always returned as errors.

use std::borrow::Cow;
use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{DocPathError, Result};
use crate::model::{Document, FromValue, Mapping, Value, ValueType};
use crate::parser::{KeyTemplate, Path, Segment};

/// Behaviour for the empty path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPathPolicy {
    /// Resolve to an empty text scalar
    #[default]
    ResolveToEmptyString,
    /// Treat as an invalid path
    Reject,
}

/// Resolution options, fixed when the engine is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Return an error for unresolvable paths instead of `None`
    pub throw_on_missing: bool,
    /// Behaviour for the empty path
    pub empty_path: EmptyPathPolicy,
}

impl EngineOptions {
    /// Fail on missing values (the default)
    pub const fn strict() -> Self {
        Self {
            throw_on_missing: true,
            empty_path: EmptyPathPolicy::ResolveToEmptyString,
        }
    }

    /// Return `None` for missing values
    pub const fn lenient() -> Self {
        Self {
            throw_on_missing: false,
            empty_path: EmptyPathPolicy::ResolveToEmptyString,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Document path engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathEngine {
    options: EngineOptions,
}

impl PathEngine {
    /// Create an engine that fails on missing values
    pub const fn new() -> Self {
        Self::with_options(EngineOptions::strict())
    }

    /// Create an engine that returns `None` for missing values
    pub const fn lenient() -> Self {
        Self::with_options(EngineOptions::lenient())
    }

    /// Create an engine with explicit options
    pub const fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Options of this engine
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Whether missing values are reported as errors
    pub fn throw_on_missing(&self) -> bool {
        self.options.throw_on_missing
    }

    /// Resolve `path` against `doc`.
    ///
    /// Returns `Ok(None)` only when the engine is lenient and the path does
    /// not resolve.
    pub fn resolve<'d>(&self, doc: &'d Document, path: &str) -> Result<Option<Cow<'d, Value>>> {
        self.suppress_missing(self.lookup(doc, path))
    }

    /// Resolve a pre-parsed path against `doc`
    pub fn resolve_path<'d>(
        &self,
        doc: &'d Document,
        path: &Path,
    ) -> Result<Option<Cow<'d, Value>>> {
        self.suppress_missing(self.lookup_path(doc, path))
    }

    /// Resolve `path` and extract a `T`
    pub fn resolve_typed<T: FromValue>(&self, doc: &Document, path: &str) -> Result<Option<T>> {
        match self.resolve(doc, path)? {
            Some(value) => T::from_value(&value)
                .map(Some)
                .ok_or_else(|| DocPathError::wrong_type(path, T::TYPE.name(), value.kind().name())),
            None => Ok(None),
        }
    }

    /// Resolve `path` and check the result against a type chosen at runtime
    pub fn resolve_as<'d>(
        &self,
        doc: &'d Document,
        path: &str,
        expected: ValueType,
    ) -> Result<Option<Cow<'d, Value>>> {
        match self.resolve(doc, path)? {
            Some(value) if expected.accepts(value.kind()) => Ok(Some(value)),
            Some(value) => Err(DocPathError::wrong_type(
                path,
                expected.name(),
                value.kind().name(),
            )),
            None => Ok(None),
        }
    }

    /// Expand `template` with `args`, then resolve
    pub fn resolve_templated<'d, I>(
        &self,
        doc: &'d Document,
        template: &str,
        args: I,
    ) -> Result<Option<Cow<'d, Value>>>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let path = expand_template(template, args)?;
        self.resolve(doc, &path)
    }

    /// Expand `template` with `args`, then resolve and extract a `T`
    pub fn resolve_templated_typed<T, I>(
        &self,
        doc: &Document,
        template: &str,
        args: I,
    ) -> Result<Option<T>>
    where
        T: FromValue,
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let path = expand_template(template, args)?;
        self.resolve_typed(doc, &path)
    }

    /// Resolve a text value
    pub fn get_string(&self, doc: &Document, path: &str) -> Result<Option<String>> {
        self.resolve_typed(doc, path)
    }

    /// Resolve a numeric value as an integer
    pub fn get_integer(&self, doc: &Document, path: &str) -> Result<Option<i64>> {
        self.resolve_typed(doc, path)
    }

    /// Resolve a numeric value as a float
    pub fn get_float(&self, doc: &Document, path: &str) -> Result<Option<f64>> {
        self.resolve_typed(doc, path)
    }

    /// Resolve a boolean value
    pub fn get_bool(&self, doc: &Document, path: &str) -> Result<Option<bool>> {
        self.resolve_typed(doc, path)
    }

    /// Resolve a sequence
    pub fn get_sequence(&self, doc: &Document, path: &str) -> Result<Option<Vec<Value>>> {
        self.resolve_typed(doc, path)
    }

    /// Resolve a mapping
    pub fn get_mapping(&self, doc: &Document, path: &str) -> Result<Option<Mapping>> {
        self.resolve_typed(doc, path)
    }

    /// Templated [`get_string`](Self::get_string)
    pub fn get_string_templated<I>(&self, doc: &Document, template: &str, args: I) -> Result<Option<String>>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.resolve_templated_typed(doc, template, args)
    }

    /// Templated [`get_integer`](Self::get_integer)
    pub fn get_integer_templated<I>(&self, doc: &Document, template: &str, args: I) -> Result<Option<i64>>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.resolve_templated_typed(doc, template, args)
    }

    /// Templated [`get_float`](Self::get_float)
    pub fn get_float_templated<I>(&self, doc: &Document, template: &str, args: I) -> Result<Option<f64>>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.resolve_templated_typed(doc, template, args)
    }

    /// Templated [`get_bool`](Self::get_bool)
    pub fn get_bool_templated<I>(&self, doc: &Document, template: &str, args: I) -> Result<Option<bool>>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.resolve_templated_typed(doc, template, args)
    }

    /// Templated [`get_sequence`](Self::get_sequence)
    pub fn get_sequence_templated<I>(
        &self,
        doc: &Document,
        template: &str,
        args: I,
    ) -> Result<Option<Vec<Value>>>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.resolve_templated_typed(doc, template, args)
    }

    /// Templated [`get_mapping`](Self::get_mapping)
    pub fn get_mapping_templated<I>(&self, doc: &Document, template: &str, args: I) -> Result<Option<Mapping>>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.resolve_templated_typed(doc, template, args)
    }

    /// Resolve without applying `throw_on_missing`
    pub(crate) fn lookup<'d>(&self, doc: &'d Document, path: &str) -> Result<Cow<'d, Value>> {
        let path = Path::parse(path)?;
        self.lookup_path(doc, &path)
    }

    fn lookup_path<'d>(&self, doc: &'d Document, path: &Path) -> Result<Cow<'d, Value>> {
        if path.is_empty() {
            return match self.options.empty_path {
                EmptyPathPolicy::ResolveToEmptyString => Ok(Cow::Owned(Value::String(String::new()))),
                EmptyPathPolicy::Reject => Err(DocPathError::invalid_path("", "empty path")),
            };
        }

        let value = descend(doc.root(), path)?;
        trace!("[{}] {} = {}", doc.name(), path, value);
        Ok(Cow::Borrowed(value))
    }

    fn suppress_missing<T>(&self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_missing() && !self.options.throw_on_missing => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn expand_template<I>(template: &str, args: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let args: Vec<String> = args.into_iter().map(|arg| arg.to_string()).collect();
    if args.is_empty() {
        return Err(DocPathError::invalid_argument(format!(
            "Key template '{template}' needs at least one argument"
        )));
    }
    Ok(KeyTemplate::new(template).expand(args))
}

/// Walk `path` from `root`. Every segment but the last must land on a mapping.
fn descend<'d>(root: &'d Mapping, path: &Path) -> Result<&'d Value> {
    let mut current = root;
    let mut segments = path.segments().iter().peekable();

    while let Some(segment) = segments.next() {
        let value = step(current, segment, path)?;
        if segments.peek().is_none() {
            return Ok(value);
        }
        current = value.as_mapping().ok_or_else(|| {
            DocPathError::invalid_path(
                path.as_str(),
                format!("cannot descend below '{segment}': value is of kind {}", value.kind()),
            )
        })?;
    }

    Err(DocPathError::invalid_path(path.as_str(), "empty path"))
}

fn step<'d>(current: &'d Mapping, segment: &Segment, path: &Path) -> Result<&'d Value> {
    let name = segment.name();
    let field = current
        .get(name)
        .ok_or_else(|| DocPathError::invalid_path(path.as_str(), format!("field '{name}' not found")))?;

    let value = match segment {
        Segment::Field(_) => field,
        Segment::Indexed { index, .. } => {
            let items = field.as_sequence().ok_or_else(|| {
                DocPathError::invalid_path(
                    path.as_str(),
                    format!("field '{name}' is of kind {}, not a sequence", field.kind()),
                )
            })?;
            items.get(*index).ok_or_else(|| {
                DocPathError::invalid_path(
                    path.as_str(),
                    format!("index {index} out of range for '{name}' of length {}", items.len()),
                )
            })?
        }
    };

    if value.is_null() {
        return Err(DocPathError::invalid_path(
            path.as_str(),
            format!("'{segment}' is null"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    fn array_doc() -> Document {
        Document::from_value(Value::from(json!({
            "key1": {
                "array2": [
                    {"key3": {"key4": "value4"}},
                    {"key3": {"array4": ["value4A", "value4B"]}}
                ]
            },
            "empty": null,
            "count": 3,
            "ratio": 1.5
        })))
        .unwrap()
    }

    #[test]
    fn test_resolve_nested() {
        let doc = array_doc();
        let engine = PathEngine::new();
        assert_eq!(
            engine.resolve(&doc, "key1.array2[0].key3.key4").unwrap().as_deref(),
            Some(&Value::from("value4"))
        );
        assert_eq!(
            engine.resolve(&doc, "key1.array2[1].key3.array4[1]").unwrap().as_deref(),
            Some(&Value::from("value4B"))
        );
    }

    #[test]
    fn test_missing_throws_by_default() {
        let doc = array_doc();
        let engine = PathEngine::new();
        assert!(engine.throw_on_missing());
        for path in [
            "key1.array2[5].key3.key4",
            "key1.array2[0].key3.key5",
            "key1.array9[0].key3",
            "key1.array2.key3",
            "key1.array2[0].key3.key4.deeper",
            "key1[0]",
            "empty",
        ] {
            let err = engine.resolve(&doc, path).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPath, "{path}");
            assert_eq!(err.path(), Some(path));
        }
    }

    #[test]
    fn test_missing_messages_name_the_kind() {
        let doc = array_doc();
        let engine = PathEngine::new();

        let err = engine.resolve(&doc, "key1[0]").unwrap_err();
        assert!(
            err.to_string().contains("field 'key1' is of kind mapping, not a sequence"),
            "{err}"
        );

        let err = engine.resolve(&doc, "key1.array2[0].key3.key4.deeper").unwrap_err();
        assert!(
            err.to_string().contains("cannot descend below 'key4': value is of kind text"),
            "{err}"
        );
    }

    #[test]
    fn test_missing_is_none_when_lenient() {
        let doc = array_doc();
        let engine = PathEngine::lenient();
        assert_eq!(engine.resolve(&doc, "key1.array2[5].key3.key4").unwrap(), None);
        assert_eq!(engine.resolve(&doc, "key1.array2[-1]").unwrap(), None);
        assert_eq!(engine.get_string(&doc, "nope").unwrap(), None);
    }

    #[test]
    fn test_empty_path_policy() {
        let doc = array_doc();
        assert_eq!(
            PathEngine::new().resolve(&doc, "").unwrap().as_deref(),
            Some(&Value::from(""))
        );

        let strict = PathEngine::with_options(EngineOptions {
            empty_path: EmptyPathPolicy::Reject,
            ..EngineOptions::default()
        });
        assert_eq!(
            strict.resolve(&doc, "").unwrap_err().kind(),
            ErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_typed() {
        let doc = array_doc();
        let engine = PathEngine::new();
        assert_eq!(engine.get_integer(&doc, "count").unwrap(), Some(3));
        assert_eq!(engine.get_float(&doc, "count").unwrap(), Some(3.0));
        assert_eq!(engine.get_integer(&doc, "ratio").unwrap(), Some(1));
        assert_eq!(
            engine.get_sequence(&doc, "key1.array2[1].key3.array4").unwrap().map(|v| v.len()),
            Some(2)
        );
        assert!(engine.get_mapping(&doc, "key1").unwrap().is_some());
    }

    #[test]
    fn test_wrong_type_is_never_suppressed() {
        let doc = array_doc();
        for engine in [PathEngine::new(), PathEngine::lenient()] {
            let err = engine.get_bool(&doc, "count").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::WrongType);
            assert_eq!(
                err,
                DocPathError::wrong_type("count", "boolean", "integer")
            );
        }
    }

    #[test]
    fn test_resolve_as() {
        let doc = array_doc();
        let engine = PathEngine::new();
        assert!(engine.resolve_as(&doc, "count", ValueType::Float).is_ok());
        assert_eq!(
            engine.resolve_as(&doc, "key1", ValueType::Text).unwrap_err().kind(),
            ErrorKind::WrongType
        );
    }

    #[test]
    fn test_templated() {
        let doc = array_doc();
        let engine = PathEngine::new();
        assert_eq!(
            engine.get_string_templated(&doc, "key1.array2[?].key3.key4", [0]).unwrap(),
            Some("value4".to_string())
        );

        let err = engine
            .resolve_templated(&doc, "key1.array2[?]", Vec::<i32>::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_templated_zero_args_not_suppressed() {
        let doc = array_doc();
        let err = PathEngine::lenient()
            .get_integer_templated(&doc, "count", Vec::<&str>::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
