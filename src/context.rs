//! Scenario step surface.
//!
//! One operation per natural-language step pattern. This layer owns no
//! algorithmic logic: it parses step arguments, applies literal-or-parameter
//! indirection, and delegates to the assertion catalog.

use crate::{assert, ingest::ingest, ConfigStore, CountCmp, Error, ResponseFormat, Value};

/// External collaborator that retrieves a page or API response.
pub trait PageFetcher {
    /// Fetches the raw response bytes for a fully-formed URL.
    /// # Return
    /// The response body, or an [`Error::Fetch`] on transport failure.
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, Error>;
}

/// Per-scenario execution state.
///
/// Every scenario gets its own context; the ingested response tree is
/// replaced wholesale by each call step and never shared across scenarios.
pub struct ApiContext {
    config: ConfigStore,
    fetcher: Box<dyn PageFetcher>,
    response: Option<Value>,
    override_text: Option<String>,
}

impl ApiContext {
    pub fn new(config: ConfigStore, fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            config,
            fetcher,
            response: None,
            override_text: None,
        }
    }

    /// One-shot display text replacing the runner's normal step output,
    /// consumed and cleared by the reporting layer after the step completes.
    pub fn take_override_text(&mut self) -> Option<String> {
        self.override_text.take()
    }

    /// The currently ingested response tree.
    pub fn response(&self) -> Result<&Value, Error> {
        self.response.as_ref().ok_or_else(|| {
            Error::MissingProperty("no response ingested; run a call step first".to_owned())
        })
    }

    /// Resolves a raw step argument.
    ///
    /// A leading backslash marks the remainder as a literal, despite any
    /// further backslashes or `@` signs. A leading `@` routes the remainder
    /// to the configuration store as a parameter path. Anything else is the
    /// literal itself.
    fn resolve_argument(&self, raw: &str) -> Result<Value, Error> {
        if let Some(literal) = raw.strip_prefix('\\') {
            Ok(Value::String(literal.to_owned()))
        } else if let Some(parameter) = raw.strip_prefix('@') {
            self.parameter(parameter).cloned()
        } else {
            Ok(Value::String(raw.to_owned()))
        }
    }

    fn resolve_argument_str(&self, raw: &str) -> Result<String, Error> {
        Ok(self.resolve_argument(raw)?.to_string())
    }

    /// Count arguments accept indirection too; the resolved value must be a
    /// non-negative integer.
    fn resolve_count(&self, raw: &str) -> Result<usize, Error> {
        let value = self.resolve_argument(raw)?;
        match &value {
            Value::Number(n) if n.fract() == 0.0 && *n >= 0.0 => Ok(*n as usize),
            Value::String(s) => s.parse::<usize>().map_err(|_| {
                Error::Assertion(format!("expected a count, found: \"{s}\""))
            }),
            other => Err(Error::Assertion(format!(
                "expected a count, found: \"{other}\""
            ))),
        }
    }

    fn parameter(&self, path: &str) -> Result<&Value, Error> {
        self.config
            .lookup(path)
            .ok_or_else(|| Error::Configuration(format!("missing config parameter: {path}")))
    }

    /// `I call "<path>" as "<format>"`
    pub fn call_as(&mut self, path: &str, format: &str) -> Result<(), Error> {
        self.call_as_with(path, format, "")
    }

    /// `I call "<path>" as "<format>" with "<append>"`
    pub fn call_as_with(&mut self, path: &str, format: &str, append: &str) -> Result<(), Error> {
        let format: ResponseFormat = format.parse()?;
        let base_url = self.parameter("base_url")?.to_string();
        let path = self.resolve_argument_str(path)?;

        let url = format!("{base_url}{path}.{}{append}", format.suffix());
        log::debug!("calling {url}");

        let raw = self.fetcher.fetch(&url)?;
        if raw.is_empty() {
            return Err(Error::Fetch(format!("could not open {path}")));
        }

        self.response = Some(ingest(&raw, format)?);
        Ok(())
    }

    /// `I call parameter "<parameter>" as "<format>"`
    pub fn call_parameter_as(&mut self, parameter: &str, format: &str) -> Result<(), Error> {
        let path = self.parameter(parameter)?.to_string();
        self.call_as(&path, format)
    }

    /// `property "<path>" should exist`
    pub fn property_should_exist(&self, path: &str) -> Result<(), Error> {
        assert::exists(self.response()?, path)
    }

    /// `property "<path>" should be "<value>"`
    pub fn property_should_be(&self, path: &str, value: &str) -> Result<(), Error> {
        let expected = self.resolve_argument(value)?;
        assert::equals(self.response()?, path, &expected)
    }

    /// `property "<path>" should be parameter "<parameter>"`
    pub fn property_should_be_parameter(
        &mut self,
        path: &str,
        parameter: &str,
    ) -> Result<(), Error> {
        let expected = self.parameter(parameter)?.clone();
        assert::equals(self.response()?, path, &expected)?;
        self.override_text = Some(format!("property \"{path}\" should be \"{expected}\""));
        Ok(())
    }

    /// `property "<path>" should match "<pattern>"`
    pub fn property_should_match(&self, path: &str, pattern: &str) -> Result<(), Error> {
        assert::matches(self.response()?, path, pattern)
    }

    /// `property "<path>" should contain "<value>"`
    pub fn property_should_contain(&self, path: &str, value: &str) -> Result<(), Error> {
        let needle = self.resolve_argument_str(value)?;
        assert::contains(self.response()?, path, &needle)
    }

    /// `property "<path>" should be of type "<type>"`
    pub fn property_should_be_of_type(&self, path: &str, type_spec: &str) -> Result<(), Error> {
        let type_spec = self.resolve_argument_str(type_spec)?;
        assert::has_type(self.response()?, path, &type_spec)
    }

    /// `property "<path>" all should be of type "<type>"`
    pub fn property_all_should_be_of_type(&self, path: &str, type_spec: &str) -> Result<(), Error> {
        let type_spec = self.resolve_argument_str(type_spec)?;
        assert::all_have_type(self.response()?, path, &type_spec)
    }

    /// `property "<path>" at least "<required>" should be of type "<type>"`
    pub fn property_at_least_should_be_of_type(
        &self,
        path: &str,
        required: &str,
        type_spec: &str,
    ) -> Result<(), Error> {
        let required = self.resolve_count(required)?;
        let type_spec = self.resolve_argument_str(type_spec)?;
        assert::at_least_have_type(self.response()?, path, required, &type_spec)
    }

    /// `property "<path>" at least "<required>" should exist`
    pub fn property_at_least_should_exist(&self, path: &str, required: &str) -> Result<(), Error> {
        let required = self.resolve_count(required)?;
        assert::at_least_exist(self.response()?, path, required)
    }

    /// `property "<path>" at least "<required>" should have "<children>" children`
    pub fn property_at_least_should_have_children(
        &self,
        path: &str,
        required: &str,
        children: &str,
    ) -> Result<(), Error> {
        let required = self.resolve_count(required)?;
        let children = self.resolve_count(children)?;
        assert::at_least_have_children(self.response()?, path, required, children, CountCmp::Exact)
    }

    /// `property "<path>" at least "<required>" should have at least "<children>" children`
    pub fn property_at_least_should_have_at_least_children(
        &self,
        path: &str,
        required: &str,
        children: &str,
    ) -> Result<(), Error> {
        let required = self.resolve_count(required)?;
        let children = self.resolve_count(children)?;
        assert::at_least_have_children(
            self.response()?,
            path,
            required,
            children,
            CountCmp::AtLeast,
        )
    }

    /// `property "<path>" should have "<number>" children`
    pub fn property_should_have_children(&self, path: &str, number: &str) -> Result<(), Error> {
        let number = self.resolve_count(number)?;
        assert::has_children(self.response()?, path, number, CountCmp::Exact)
    }

    /// `property "<path>" should have at least "<number>" children`
    pub fn property_should_have_at_least_children(
        &self,
        path: &str,
        number: &str,
    ) -> Result<(), Error> {
        let number = self.resolve_count(number)?;
        assert::has_children(self.response()?, path, number, CountCmp::AtLeast)
    }

    /// `property "<path>" should have less than "<number>" children`
    pub fn property_should_have_less_than_children(
        &self,
        path: &str,
        number: &str,
    ) -> Result<(), Error> {
        let number = self.resolve_count(number)?;
        assert::has_children(self.response()?, path, number, CountCmp::LessThan)
    }

    /// `property "<path>" all children should be named "<name>"`
    pub fn property_all_children_should_be_named(
        &self,
        path: &str,
        name: &str,
    ) -> Result<(), Error> {
        let name = self.resolve_argument_str(name)?;
        assert::children_all_named(self.response()?, path, &name)
    }

    /// `foreach property "<path>" a child "<child>" should exist`
    pub fn foreach_property_child_should_exist(
        &self,
        path: &str,
        child: &str,
    ) -> Result<(), Error> {
        assert::foreach_child_exists(self.response()?, path, child)
    }

    /// `foreach property "<path>" a child "<child>" should be of type "<type>"`
    pub fn foreach_property_child_should_be_of_type(
        &self,
        path: &str,
        child: &str,
        type_spec: &str,
    ) -> Result<(), Error> {
        let type_spec = self.resolve_argument_str(type_spec)?;
        assert::foreach_child_has_type(self.response()?, path, child, &type_spec)
    }

    /// `property "<path>" should be recursive "<value>"`
    pub fn property_should_be_recursive(&self, path: &str, value: &str) -> Result<(), Error> {
        let expected = self.resolve_argument(value)?;
        assert::deep_equals(self.response()?, path, &expected)
    }
}
