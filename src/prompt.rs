//! System prompt rendering.

use crate::environment::EnvironmentContext;

/// The rendered two-part prompt sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub human: String,
}

/// JSON schema the reply must satisfy, embedded in every system prompt.
pub const RESPONSE_SCHEMA: &str = r#"{"properties": {"command": {"description": "The shell command to execute", "title": "Command", "type": "string"}, "explanation": {"description": "Brief explanation of what the command does", "title": "Explanation", "type": "string"}, "risk_level": {"description": "Risk level: low, medium, high", "title": "Risk Level", "type": "string"}, "alternatives": {"default": [], "description": "Alternative commands if applicable", "items": {"type": "string"}, "title": "Alternatives", "type": "array"}}, "required": ["command", "explanation", "risk_level"]}"#;

/// Instructions wrapping [`RESPONSE_SCHEMA`].
pub fn schema_description() -> String {
    format!(
        r#"The output should be formatted as a JSON instance that conforms to the JSON schema below.

As an example, for the schema {{"properties": {{"foo": {{"title": "Foo", "description": "a list of strings", "type": "array", "items": {{"type": "string"}}}}}}, "required": ["foo"]}}
the object {{"foo": ["bar", "baz"]}} is a well-formatted instance of the schema. The object {{"properties": {{"foo": ["bar", "baz"]}}}} is not well-formatted.

Here is the output schema:
```
{schema}
```"#,
        schema = RESPONSE_SCHEMA
    )
}

pub fn assemble(
    persona: &str,
    context: &EnvironmentContext,
    schema: &str,
    request: &str,
) -> Prompt {
    let system = format!(
        r#"You are a helpful command-line assistant with the following persona:

{persona}

CURRENT CONTEXT:
- Operating System: {os}
- Current Directory: {cwd}
- Available Tools: {tools}

IMPORTANT RULES:
1. Always respond with valid JSON matching the specified format
2. Only suggest safe, appropriate commands for the current environment
3. Set risk_level to "low", "medium", or "high" based on potential impact
4. Provide brief, clear explanations
5. For medium/high risk commands, provide safer alternatives when possible
6. Consider the current working directory and system context
7. If a command needs elevated privileges, mention it in the explanation
8. Use default system applications when possible
9. Be precise and provide the best command for the scenario

{schema}

Examples of risk levels:
- LOW: ls, pwd, cat, echo, cd
- MEDIUM: cp, mv, rm (specific files), chmod (specific files), wget, curl
- HIGH: rm -rf, format, fdisk, system shutdown/reboot commands

Respond only with the JSON object, no additional text."#,
        persona = persona,
        os = context.os,
        cwd = context.current_dir,
        tools = context.tools.join(", "),
        schema = schema,
    );

    Prompt {
        system,
        human: request.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personas;

    fn context() -> EnvironmentContext {
        EnvironmentContext {
            os: "Linux 6.8.0".to_string(),
            current_dir: "/home/op/project".to_string(),
            tools: vec!["ls".to_string(), "git".to_string()],
        }
    }

    #[test]
    fn system_text_embeds_persona_and_context() {
        let persona = personas::get("windows").unwrap();
        let prompt = assemble(persona, &context(), &schema_description(), "list files here");

        assert!(prompt.system.contains(persona));
        assert!(prompt.system.contains("- Operating System: Linux 6.8.0"));
        assert!(prompt.system.contains("- Current Directory: /home/op/project"));
        assert!(prompt.system.contains("- Available Tools: ls, git"));
        assert_eq!(prompt.human, "list files here");
    }

    #[test]
    fn system_text_carries_schema_and_rubric() {
        let prompt = assemble("p", &context(), &schema_description(), "x");
        assert!(prompt.system.contains(RESPONSE_SCHEMA));
        assert!(prompt.system.contains("- HIGH: rm -rf, format, fdisk"));
        assert!(prompt
            .system
            .ends_with("Respond only with the JSON object, no additional text."));
    }

    #[test]
    fn schema_is_valid_json_naming_required_fields() {
        let schema: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        assert_eq!(
            schema["required"],
            serde_json::json!(["command", "explanation", "risk_level"])
        );
        assert_eq!(schema["properties"]["alternatives"]["type"], "array");
    }

    #[test]
    fn request_text_is_passed_through_untouched() {
        let request = "find files named {braces} and \"quotes\"";
        assert_eq!(assemble("p", &context(), "s", request).human, request);
    }
}
