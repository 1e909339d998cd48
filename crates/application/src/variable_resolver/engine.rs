//! Variable interpolation engine
//!
//! Replaces `$var`, `[[var:format]]` and `${var.path:format}` placeholders
//! with formatted variable values, following this precedence for each match:
//!
//! 1. a scoped override for the name,
//! 2. the URL value for `queryparam` and ad-hoc variables,
//! 3. a system value registered for the variable's current value,
//! 4. the expansion of an "All" selection,
//! 5. a field path into the current value,
//! 6. the current value itself.
//!
//! Unknown variables leave the placeholder untouched.

use std::sync::Arc;

use dashvar_domain::{
    ALL_VARIABLE_TEXT, InterpolationSettings, TimeRange, Variable, is_all_value,
};
use indexmap::IndexMap;
use serde_json::Value;

use super::context::InterpolationContext;
use super::parser::{Placeholder, first_placeholder, parse_placeholders};
use super::scope::{ScopedVar, ScopedVars};
use super::url_values::DefaultUrlValues;
use crate::format::{FormatRegistry, FormatSpec, ValueFormatter, VariableFormatId};
use crate::ports::UrlValueAdapter;

/// One placeholder processed during interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationRecord {
    /// The placeholder text as it appeared in the target.
    pub matched: String,
    /// Referenced variable name.
    pub variable_name: String,
    /// Field path, for `${var.path}` placeholders.
    pub field_path: Option<String>,
    /// Effective named format, if any.
    pub format: Option<String>,
    /// Substituted text; the placeholder itself when unresolved.
    pub value: String,
    /// Whether the placeholder was replaced.
    pub found: bool,
}

/// Result of interpolating a string with per-placeholder details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationResult {
    /// The interpolated string.
    pub resolved: String,
    /// Every placeholder processed, in order of appearance.
    pub interpolations: Vec<InterpolationRecord>,
}

impl InterpolationResult {
    /// Creates a result for input with no placeholders.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            interpolations: Vec::new(),
        }
    }

    /// Returns the names of variables that could not be resolved.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        self.interpolations
            .iter()
            .filter(|record| !record.found)
            .map(|record| record.variable_name.as_str())
            .collect()
    }

    /// Returns true if every placeholder was replaced.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.interpolations.iter().all(|record| record.found)
    }

    /// Returns the count of replaced placeholders.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.interpolations
            .iter()
            .filter(|record| record.found)
            .count()
    }

    /// Returns the count of placeholders left untouched.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.interpolations.len() - self.resolved_count()
    }
}

/// A value and display text ready for formatting.
struct Resolved {
    value: Value,
    text: Option<Value>,
}

/// The variable interpolation engine.
pub struct VariableResolver {
    context: InterpolationContext,
    formats: Arc<FormatRegistry>,
    url_values: Arc<dyn UrlValueAdapter>,
    settings: InterpolationSettings,
}

impl VariableResolver {
    /// Creates a resolver over `context` with the built-in formats.
    #[must_use]
    pub fn new(context: InterpolationContext) -> Self {
        Self {
            context,
            formats: Arc::new(FormatRegistry::new()),
            url_values: Arc::new(DefaultUrlValues),
            settings: InterpolationSettings::default(),
        }
    }

    /// Creates a resolver with an empty context.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(InterpolationContext::new())
    }

    /// Uses `formats` instead of the built-in registry.
    ///
    /// The registry's default format is replaced by the configured one.
    #[must_use]
    pub fn with_formats(mut self, formats: Arc<FormatRegistry>) -> Self {
        self.formats = formats;
        self.apply_default_format();
        self
    }

    /// Uses `adapter` to compute URL values.
    #[must_use]
    pub fn with_url_values(mut self, adapter: Arc<dyn UrlValueAdapter>) -> Self {
        self.url_values = adapter;
        self
    }

    /// Applies engine settings.
    #[must_use]
    pub fn with_settings(mut self, settings: InterpolationSettings) -> Self {
        self.settings = settings;
        self.apply_default_format();
        self
    }

    fn apply_default_format(&mut self) {
        if self.formats.default_format() != self.settings.default_format {
            Arc::make_mut(&mut self.formats).set_default_format(&self.settings.default_format);
        }
    }

    /// Returns the engine settings.
    #[must_use]
    pub const fn settings(&self) -> &InterpolationSettings {
        &self.settings
    }

    /// Replaces the interpolation context.
    pub fn set_context(&mut self, context: InterpolationContext) {
        self.context = context;
    }

    /// Returns a reference to the current context.
    #[must_use]
    pub const fn context(&self) -> &InterpolationContext {
        &self.context
    }

    /// Returns a mutable reference to the current context.
    pub const fn context_mut(&mut self) -> &mut InterpolationContext {
        &mut self.context
    }

    /// Returns the format registry.
    #[must_use]
    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Returns the format registry for registration of additional formats.
    ///
    /// The registry is copied first if another resolver shares it.
    pub fn formats_mut(&mut self) -> &mut FormatRegistry {
        Arc::make_mut(&mut self.formats)
    }

    /// Rebuilds the index from `variables` and an optional time range.
    pub fn rebuild(&mut self, variables: Vec<Variable>, time_range: Option<TimeRange>) {
        self.context.index_mut().rebuild(variables, time_range);
    }

    /// Replaces the time range and recomputes the index.
    pub fn notify_time_range_changed(&mut self, time_range: TimeRange) {
        self.context.index_mut().set_time_range(time_range);
    }

    /// Indexes a variable that finished initializing.
    pub fn notify_variable_initialized(&mut self, variable: Variable) {
        self.context.index_mut().insert(variable);
    }

    /// Registers a system value for a current-value token.
    pub fn set_system_value(&mut self, token: impl Into<String>, value: impl Into<Value>) {
        self.context.system_values_mut().set(token, value);
    }

    /// Returns the system value registered for `token`.
    #[must_use]
    pub fn system_value(&self, token: &str) -> Option<&Value> {
        self.context.system_values().get(token)
    }

    /// Removes the system value registered for `token`.
    pub fn remove_system_value(&mut self, token: &str) -> Option<Value> {
        self.context.system_values_mut().remove(token)
    }

    /// Returns the indexed variable called `name`.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.context.index().get(name)
    }

    /// Returns the variable name referenced by the first placeholder of `expression`.
    #[must_use]
    pub fn variable_name(expression: &str) -> Option<&str> {
        first_placeholder(expression).map(|placeholder| placeholder.name)
    }

    /// Returns true if the first placeholder of `target` names an indexed variable.
    #[must_use]
    pub fn contains_template(&self, target: &str) -> bool {
        Self::variable_name(target).is_some_and(|name| self.context.index().contains(name))
    }

    /// Interpolates every placeholder in `target`.
    ///
    /// `format` applies to placeholders that do not name their own.
    #[must_use]
    pub fn interpolate(
        &self,
        target: &str,
        scoped_vars: Option<&ScopedVars>,
        format: Option<&FormatSpec>,
    ) -> String {
        self.render(target, scoped_vars, format, &mut Vec::new(), None)
    }

    /// Interpolates `target` with the `text` format: display text instead of values.
    #[must_use]
    pub fn interpolate_text(&self, target: &str, scoped_vars: Option<&ScopedVars>) -> String {
        self.interpolate(
            target,
            scoped_vars,
            Some(&FormatSpec::from(VariableFormatId::Text)),
        )
    }

    /// Interpolates `target` and reports what happened to each placeholder.
    #[must_use]
    pub fn interpolate_with_report(
        &self,
        target: &str,
        scoped_vars: Option<&ScopedVars>,
        format: Option<&FormatSpec>,
    ) -> InterpolationResult {
        let mut interpolations = Vec::new();
        let resolved = self.render(
            target,
            scoped_vars,
            format,
            &mut Vec::new(),
            Some(&mut interpolations),
        );

        if interpolations.is_empty() {
            return InterpolationResult::no_variables(&resolved);
        }

        InterpolationResult {
            resolved,
            interpolations,
        }
    }

    /// Resolves every placeholder of `target` without building the output string.
    ///
    /// Keys are `name` or `name.path`; unknown variables map to `None`. A name
    /// appearing twice keeps its first position and its last value.
    #[must_use]
    pub fn collect_all(
        &self,
        target: &str,
        scoped_vars: Option<&ScopedVars>,
        format: Option<&FormatSpec>,
    ) -> IndexMap<String, Option<String>> {
        let mut values = IndexMap::new();
        let mut chain = Vec::new();

        for placeholder in parse_placeholders(target) {
            let captured = placeholder.format.map(FormatSpec::named);
            let format = captured.as_ref().or(format);
            let value = self.evaluate(&placeholder, format, scoped_vars, &mut chain);
            values.insert(placeholder.display_name().into_owned(), value);
        }

        values
    }

    /// Formats `value` as a placeholder for `variable` would be.
    #[must_use]
    pub fn format_value(
        &self,
        value: Option<&Value>,
        format: Option<&FormatSpec>,
        variable: Option<&Variable>,
        text: Option<&Value>,
    ) -> String {
        self.formats.format_value(value, format, variable, text)
    }

    fn render<'s>(
        &'s self,
        target: &str,
        scoped_vars: Option<&ScopedVars>,
        format: Option<&FormatSpec>,
        chain: &mut Vec<&'s str>,
        mut report: Option<&mut Vec<InterpolationRecord>>,
    ) -> String {
        if let Some(vars) = scoped_vars {
            if let Some(scene) = vars.scene() {
                return scene.interpolate(target, vars, format);
            }
        }

        if target.is_empty() {
            return String::new();
        }

        let mut result = String::with_capacity(target.len());
        let mut last_end = 0;

        for placeholder in parse_placeholders(target) {
            result.push_str(&target[last_end..placeholder.span.start]);

            let matched = &target[placeholder.span.clone()];
            let captured = placeholder.format.map(FormatSpec::named);
            let effective = captured.as_ref().or(format);
            let value = self.evaluate(&placeholder, effective, scoped_vars, chain);

            if let Some(records) = report.as_deref_mut() {
                records.push(InterpolationRecord {
                    matched: matched.to_string(),
                    variable_name: placeholder.name.to_string(),
                    field_path: placeholder.field_path.map(str::to_string),
                    format: effective.and_then(FormatSpec::name).map(str::to_string),
                    value: value.clone().unwrap_or_else(|| matched.to_string()),
                    found: value.is_some(),
                });
            }

            result.push_str(value.as_deref().unwrap_or(matched));
            last_end = placeholder.span.end;
        }

        result.push_str(&target[last_end..]);
        result
    }

    /// Resolves one placeholder. `None` means the variable is unknown.
    fn evaluate<'s>(
        &'s self,
        placeholder: &Placeholder<'_>,
        format: Option<&FormatSpec>,
        scoped_vars: Option<&ScopedVars>,
        chain: &mut Vec<&'s str>,
    ) -> Option<String> {
        let name = placeholder.name;
        let field_path = placeholder.field_path;
        let variable = self.context.index().get(name);

        if let Some(scoped) = scoped_vars.and_then(|vars| vars.get(name)) {
            if let Some(resolved) = self.scoped_value(scoped, field_path) {
                let format = if scoped.skip_format { None } else { format };
                return Some(self.format_value(
                    Some(&resolved.value),
                    format,
                    variable,
                    resolved.text.as_ref(),
                ));
            }
        }

        let variable = variable?;

        if variable.is_ad_hoc()
            || format.is_some_and(|format| format.is(VariableFormatId::QueryParam))
        {
            let value = self.url_values.value_for_url(variable);
            let text = if variable.is_ad_hoc() {
                Some(Value::String(variable.id().to_string()))
            } else {
                variable.current_text().cloned()
            };
            return Some(self.format_value(Some(&value), format, Some(variable), text.as_ref()));
        }

        if let Some(system_value) = variable
            .current_value()
            .and_then(Value::as_str)
            .and_then(|token| self.context.system_values().get(token))
        {
            return Some(self.format_value(
                Some(system_value),
                format,
                Some(variable),
                variable.current_text(),
            ));
        }

        let mut resolved = Resolved {
            value: variable.current_value().cloned().unwrap_or(Value::Null),
            text: variable.current_text().cloned(),
        };

        if is_all_value(&resolved.value) {
            if let Some(all_value) = variable.custom_all_value() {
                if !format.is_some_and(|format| format.is(VariableFormatId::Text)) {
                    return Some(self.expand_custom_all_value(variable, all_value, chain));
                }
            }
            resolved = Resolved {
                value: variable.all_value(),
                text: Some(Value::String(ALL_VARIABLE_TEXT.to_string())),
            };
        }

        if let Some(path) = field_path {
            if let Some(value) = self.context.field_accessors().extract(path, &resolved.value) {
                return Some(self.format_value(
                    Some(&value),
                    format,
                    Some(variable),
                    resolved.text.as_ref(),
                ));
            }
        }

        Some(self.format_value(
            Some(&resolved.value),
            format,
            Some(variable),
            resolved.text.as_ref(),
        ))
    }

    /// Reads an override, through the field path if one is given.
    ///
    /// `None` when the override (or the extracted field) is null, in which
    /// case resolution continues with the indexed variable.
    fn scoped_value(&self, scoped: &ScopedVar, field_path: Option<&str>) -> Option<Resolved> {
        let value = match field_path {
            Some(path) => self.context.field_accessors().extract(path, &scoped.value)?,
            None if scoped.value.is_null() => return None,
            None => scoped.value.clone(),
        };

        // An extracted string is its own display text.
        let text = if field_path.is_some() && value.is_string() {
            Some(value.clone())
        } else {
            scoped.text.clone()
        };

        Some(Resolved { value, text })
    }

    /// Interpolates a custom all-value, which may reference other variables.
    ///
    /// Expansion stops at a variable already being expanded or at the
    /// configured depth; the literal is returned unformatted in that case.
    fn expand_custom_all_value<'s>(
        &'s self,
        variable: &'s Variable,
        all_value: &'s str,
        chain: &mut Vec<&'s str>,
    ) -> String {
        let name = variable.name.as_str();
        if chain.contains(&name) || chain.len() >= self.settings.max_all_value_depth {
            tracing::warn!(
                variable = name,
                depth = chain.len(),
                "custom all value expansion stopped, using it verbatim"
            );
            return all_value.to_string();
        }

        chain.push(name);
        let expanded = self.render(all_value, None, None, chain, None);
        chain.pop();
        expanded
    }
}

impl Default for VariableResolver {
    fn default() -> Self {
        Self::empty()
    }
}
