mod common;

use common::*;
use groq_cli::error::ProviderError;
use groq_cli::interrupt::{Interrupts, Phase};
use groq_cli::personas;
use groq_cli::pipeline::{AbortReason, RequestOutcome, RequestState};
use groq_cli::session::Session;
use groq_cli::types::{ExecutionResult, RiskLevel};
use groq_cli::ui::Tone;
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn low_risk_request_defaults_to_yes_and_runs() {
    let model = ScriptedModel::replying(LS_REPLY);
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(model.clone(), runner.clone());
    let mut console = ScriptedConsole::answering(vec![]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "list files here");

    assert_eq!(console.asked_default(), Some(true));
    assert!(!console.saw_banner());
    assert_eq!(runner.ran(), vec!["ls -la".to_string()]);
    assert!(matches!(outcome, RequestOutcome::Executed(r) if r.success));
    assert!(console.said("Command completed successfully"));
    assert_eq!(model.prompts()[0].human, "list files here");
}

#[test]
fn high_risk_request_warns_and_decline_skips_execution() {
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(ScriptedModel::replying(RM_REPLY), runner.clone());
    let mut console = ScriptedConsole::answering(vec![Some(false)]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "delete /tmp/x");

    assert!(console.saw_banner());
    assert_eq!(console.asked_default(), Some(false));
    assert!(matches!(outcome, RequestOutcome::Declined));
    assert_eq!(outcome.final_state(), RequestState::Done);
    assert!(runner.ran().is_empty());
    assert!(console.said("Command not executed."));
}

#[test]
fn banner_comes_before_the_question() {
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(ScriptedModel::replying(RM_REPLY), runner);
    let mut console = ScriptedConsole::answering(vec![Some(false)]);
    pipeline.process_request(&Session::default(), &mut console, "delete /tmp/x");

    let banner = console.shown.iter().position(|s| *s == Shown::HighRiskBanner);
    let asked = console
        .shown
        .iter()
        .position(|s| matches!(s, Shown::Asked(..)));
    assert!(banner.unwrap() < asked.unwrap());
}

#[test]
fn high_risk_runs_only_with_explicit_approval() {
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(ScriptedModel::replying(RM_REPLY), runner.clone());
    let mut console = ScriptedConsole::answering(vec![Some(true)]);

    pipeline.process_request(&Session::default(), &mut console, "delete /tmp/x");
    assert_eq!(runner.ran(), vec!["rm -rf /tmp/x".to_string()]);
}

#[test]
fn medium_and_unrecognized_default_to_no_without_banner() {
    for risk in ["medium", "catastrophic"] {
        let reply = format!(
            r#"{{"command": "cp a b", "explanation": "copy", "risk_level": "{}"}}"#,
            risk
        );
        let runner = RecordingRunner::returning(ExecutionResult::succeeded());
        let pipeline = pipeline(ScriptedModel::replying(&reply), runner.clone());
        let mut console = ScriptedConsole::answering(vec![]);

        let outcome = pipeline.process_request(&Session::default(), &mut console, "copy a to b");

        assert_eq!(console.asked_default(), Some(false), "{}", risk);
        assert!(!console.saw_banner(), "{}", risk);
        assert!(matches!(outcome, RequestOutcome::Declined), "{}", risk);
        assert!(runner.ran().is_empty());
    }
}

#[test]
fn unparseable_reply_aborts_before_confirmation() {
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let model = ScriptedModel::replying("I think you want to run ls, it lists files.");
    let pipeline = pipeline(model, runner.clone());
    let mut console = ScriptedConsole::answering(vec![Some(true)]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "list files here");

    assert!(matches!(outcome, RequestOutcome::Aborted(AbortReason::Parse(_))));
    assert_eq!(outcome.final_state(), RequestState::Aborted);
    assert!(!console.saw_suggestion());
    assert_eq!(console.asked_default(), None);
    assert!(runner.ran().is_empty());
    assert!(console.said("Failed to get command suggestion"));
}

#[test]
fn reply_missing_command_is_never_partially_shown() {
    let reply = r#"{"explanation": "list", "risk_level": "low", "alternatives": []}"#;
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(ScriptedModel::replying(reply), runner.clone());
    let mut console = ScriptedConsole::answering(vec![]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "ls");
    assert!(matches!(outcome, RequestOutcome::Aborted(AbortReason::Parse(_))));
    assert!(!console.saw_suggestion());
    assert!(runner.ran().is_empty());
}

#[test]
fn provider_failure_aborts_with_message() {
    let model = ScriptedModel::new(vec![Err(ProviderError::new("401 Unauthorized"))]);
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(model, runner.clone());
    let mut console = ScriptedConsole::answering(vec![]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "ls");

    assert!(matches!(outcome, RequestOutcome::Aborted(AbortReason::Provider(_))));
    assert!(console.said("401 Unauthorized"));
    assert!(console
        .shown
        .iter()
        .any(|s| matches!(s, Shown::Said(Tone::Error, m) if m.contains("Failed to get command suggestion"))));
    assert!(runner.ran().is_empty());
}

#[test]
fn interrupted_confirmation_never_executes() {
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(ScriptedModel::replying(LS_REPLY), runner.clone());
    // low risk would default to yes; the interrupt must still decline
    let mut console = ScriptedConsole::answering(vec![None]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "list files");

    assert!(matches!(outcome, RequestOutcome::Declined));
    assert!(runner.ran().is_empty());
}

#[test]
fn non_zero_exit_is_an_outcome_not_an_error() {
    let runner = RecordingRunner::returning(ExecutionResult::failed(Some(2)));
    let pipeline = pipeline(ScriptedModel::replying(LS_REPLY), runner);
    let mut console = ScriptedConsole::answering(vec![Some(true)]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "list files");

    match outcome {
        RequestOutcome::Executed(result) => {
            assert!(!result.success);
            assert_eq!(result.exit_code, Some(2));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(console.said("Command exited with code 2"));
}

#[test]
fn interrupted_execution_is_reported() {
    let runner = RecordingRunner::returning(ExecutionResult::interrupted());
    let pipeline = pipeline(ScriptedModel::replying(LS_REPLY), runner);
    let mut console = ScriptedConsole::answering(vec![Some(true)]);

    let outcome = pipeline.process_request(&Session::default(), &mut console, "list files");
    assert!(matches!(outcome, RequestOutcome::Executed(r) if r.interrupted && !r.success));
    assert!(console.said("Command interrupted by user"));
}

#[test]
fn interrupt_while_waiting_for_model_aborts() {
    let interrupts = Interrupts::new();
    let model = ScriptedModel::slow(LS_REPLY, Duration::from_secs(5));
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline_with(model, runner.clone(), interrupts.clone());

    let signaller = std::thread::spawn(move || {
        while interrupts.phase() != Phase::AwaitingModel {
            std::thread::sleep(Duration::from_millis(5));
        }
        interrupts.signal();
    });

    let mut console = ScriptedConsole::answering(vec![Some(true)]);
    let outcome = pipeline.process_request(&Session::default(), &mut console, "list files");
    signaller.join().unwrap();

    assert!(matches!(outcome, RequestOutcome::Aborted(AbortReason::Interrupted)));
    assert!(!console.saw_suggestion());
    assert!(runner.ran().is_empty());
    assert!(console.said("Cancelled by user."));
}

#[test]
fn persona_switch_changes_the_rendered_prompt() {
    let model = ScriptedModel::replying(LS_REPLY);
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(model.clone(), runner);
    let mut session = Session::default();
    session.switch_persona("security").unwrap();

    let mut console = ScriptedConsole::answering(vec![Some(false)]);
    pipeline.process_request(&session, &mut console, "scan my open ports");

    let system = &model.prompts()[0].system;
    assert!(system.contains(personas::get("security").unwrap()));
    assert!(system.contains("ALWAYS marking potentially dangerous security tools as HIGH RISK"));
    assert!(!system.contains(personas::get("linux").unwrap()));
    assert!(matches!(
        console.shown.iter().find(|s| matches!(s, Shown::Suggestion(..))),
        Some(Shown::Suggestion(persona, _)) if persona == "security"
    ));
}

#[test]
fn failed_persona_switch_keeps_previous_guidance() {
    let model = ScriptedModel::replying(LS_REPLY);
    let pipeline = pipeline(model, RecordingRunner::returning(ExecutionResult::succeeded()));
    let mut session = Session::with_persona("windows").unwrap();
    assert!(session.switch_persona("solaris").is_err());

    let prompt = pipeline.render_prompt(&session, "list files");
    assert!(prompt.system.contains(personas::get("windows").unwrap()));
}

#[test]
fn prompt_carries_environment_context() {
    let pipeline = pipeline(
        ScriptedModel::replying(LS_REPLY),
        RecordingRunner::returning(ExecutionResult::succeeded()),
    );
    let prompt = pipeline.render_prompt(&Session::default(), "where am i");
    assert!(prompt.system.contains("- Operating System: Linux 6.8.0-test"));
    assert!(prompt.system.contains("- Current Directory: /work"));
    assert!(prompt.system.contains("- Available Tools: ls, git"));
}

#[test]
fn suggestion_fields_reach_the_console_intact() {
    let pipeline = pipeline(
        ScriptedModel::replying(RM_REPLY),
        RecordingRunner::returning(ExecutionResult::succeeded()),
    );
    let mut console = ScriptedConsole::answering(vec![Some(false)]);
    pipeline.process_request(&Session::default(), &mut console, "delete /tmp/x");

    let suggestion = console
        .shown
        .iter()
        .find_map(|s| match s {
            Shown::Suggestion(_, s) => Some(s.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(suggestion.command, "rm -rf /tmp/x");
    assert_eq!(suggestion.risk_level, RiskLevel::High);
    assert_eq!(suggestion.alternatives, vec!["rm -ri /tmp/x".to_string()]);
}

#[test]
fn requests_are_independent() {
    let model = ScriptedModel::new(vec![
        Ok("not json".to_string()),
        Ok(LS_REPLY.to_string()),
    ]);
    let runner = RecordingRunner::returning(ExecutionResult::succeeded());
    let pipeline = pipeline(model, runner.clone());
    let session = Session::default();

    let mut console = ScriptedConsole::answering(vec![]);
    let first = pipeline.process_request(&session, &mut console, "one");
    let second = pipeline.process_request(&session, &mut console, "two");

    assert!(matches!(first, RequestOutcome::Aborted(_)));
    assert!(matches!(second, RequestOutcome::Executed(_)));
    assert_eq!(runner.ran(), vec!["ls -la".to_string()]);
}
