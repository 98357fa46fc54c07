mod common;

use anyhow::Result;
use common::RecordingTransport;
use std::path::PathBuf;
use training_plan_lib::{
    Config, EditorError, EntryField, ExerciseSpec, ExerciseTemplate, InvalidReason, PlanError,
    PlannerService, SubmissionFailure, SubmissionState, SubmitOutcome,
};

fn create_test_service(transport: std::sync::Arc<RecordingTransport>) -> Result<PlannerService> {
    PlannerService::with_transport(Config::default(), PathBuf::from("test_config.toml"), transport)
}

#[tokio::test]
async fn test_editor_closes_after_successful_submit() -> Result<()> {
    let transport = RecordingTransport::succeeding();
    let service = create_test_service(transport.clone())?;

    let mut editor = service.open_editor();
    assert!(editor.is_open());
    editor.set_name("Leg Day")?;
    let index = editor.add_entry()?;
    editor.update_entry_field(index, EntryField::ExerciseName, "Sentadillas")?;
    editor.update_entry_field(index, EntryField::Sets, "4")?;
    editor.update_entry_field(index, EntryField::Repetitions, "15")?;
    editor.add_entry()?;
    assert_eq!(editor.model().total_duration_minutes(), 5.0);

    let outcome = editor.submit().await;
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert!(!editor.is_open());
    assert_eq!(editor.submission_state(), SubmissionState::Idle);
    assert_eq!(transport.request_count(), 1);

    // Nothing further is sent once closed.
    assert_eq!(editor.submit().await, SubmitOutcome::Abandoned);
    assert_eq!(transport.request_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_editor_stays_open_after_failure_and_invalid() -> Result<()> {
    let transport =
        RecordingTransport::failing(SubmissionFailure::Transport("timed out".to_string()));
    let service = create_test_service(transport.clone())?;

    let mut editor = service.open_editor();
    assert_eq!(
        editor.submit().await,
        SubmitOutcome::Invalid(InvalidReason::MissingName)
    );
    assert!(editor.is_open());

    editor.set_name("Core")?;
    editor.add_entry()?;
    let before = editor.model().clone();
    let outcome = editor.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Failed(SubmissionFailure::Transport(_))));
    assert!(editor.is_open());
    assert_eq!(editor.model(), &before);
    assert_eq!(editor.submission_state(), SubmissionState::Idle);
    Ok(())
}

#[test]
fn test_cancel_closes_session() -> Result<()> {
    let service = create_test_service(RecordingTransport::succeeding())?;
    let mut editor = service.open_editor();
    editor.add_entry()?;
    let session = editor.session();
    editor.cancel();
    assert!(!session.is_live());
    Ok(())
}

#[tokio::test]
async fn test_closed_editor_rejects_edits() -> Result<()> {
    let service = create_test_service(RecordingTransport::succeeding())?;
    let mut editor = service.open_editor();
    editor.set_name("Leg Day")?;
    editor.add_entry()?;
    assert_eq!(editor.submit().await, SubmitOutcome::Submitted);

    let before = editor.model().clone();
    assert_eq!(editor.set_name("Arm Day"), Err(EditorError::Closed));
    assert_eq!(editor.add_entry(), Err(EditorError::Closed));
    assert_eq!(
        editor.update_entry_field(0, EntryField::Sets, "9"),
        Err(EditorError::Closed)
    );
    assert_eq!(editor.remove_entry(0), Err(EditorError::Closed));
    assert_eq!(editor.model(), &before);
    Ok(())
}

#[test]
fn test_editor_remove_entry() -> Result<()> {
    let service = create_test_service(RecordingTransport::succeeding())?;
    let mut editor = service.open_editor();
    editor.add_entry()?;
    editor.add_entry()?;
    editor.remove_entry(1)?;
    assert_eq!(editor.model().len(), 1);
    assert_eq!(
        editor.remove_entry(3),
        Err(EditorError::Plan(PlanError::OutOfRange { index: 3, len: 1 }))
    );
    Ok(())
}

#[test]
fn test_exercise_spec_parsing() -> Result<()> {
    assert_eq!(
        "Sentadillas:4:15".parse::<ExerciseSpec>()?,
        ExerciseSpec {
            name: "Sentadillas".to_string(),
            sets: Some("4".to_string()),
            repetitions: Some("15".to_string()),
        }
    );
    assert_eq!(
        "Plancha".parse::<ExerciseSpec>()?,
        ExerciseSpec {
            name: "Plancha".to_string(),
            sets: None,
            repetitions: None,
        }
    );
    assert_eq!("Plancha::20".parse::<ExerciseSpec>()?.repetitions, Some("20".to_string()));
    assert!("".parse::<ExerciseSpec>().is_err());
    assert!("a:1:2:3".parse::<ExerciseSpec>().is_err());
    Ok(())
}

#[test]
fn test_compose_uses_template_defaults() -> Result<()> {
    let service = create_test_service(RecordingTransport::succeeding())?;
    let specs: Vec<ExerciseSpec> = vec!["Sentadillas:4:15".parse()?, "Plancha".parse()?];
    let editor = service.compose("Leg Day", &specs)?;

    let model = editor.model();
    assert_eq!(model.name(), "Leg Day");
    assert_eq!(model.entry(0)?.exercise_name(), "Sentadillas");
    assert_eq!(model.entry(1)?.exercise_name(), "Plancha");
    assert_eq!(model.entry(1)?.sets(), "3");
    assert_eq!(model.entry(1)?.repetitions(), "30");
    assert_eq!(model.total_duration_minutes(), 2.0 + 2.25);
    Ok(())
}

#[test]
fn test_compose_rejects_unknown_exercise() -> Result<()> {
    let service = create_test_service(RecordingTransport::succeeding())?;
    let specs: Vec<ExerciseSpec> = vec!["Burpees:3:10".parse()?];
    let err = service.compose("Leg Day", &specs).err().expect("unknown exercise should fail");
    assert!(format!("{err:#}").contains("Unknown exercise: Burpees"));
    Ok(())
}

#[test]
fn test_service_uses_configured_catalog() -> Result<()> {
    let config = Config {
        catalog: Some(vec![ExerciseTemplate::new("Dominadas", 1.5, 5, 5)]),
        ..Default::default()
    };
    let service = PlannerService::with_transport(
        config,
        PathBuf::from("test_config.toml"),
        RecordingTransport::succeeding(),
    )?;
    assert_eq!(service.list_templates().len(), 1);

    let mut editor = service.open_editor();
    editor.add_entry()?;
    assert_eq!(editor.model().entry(0)?.exercise_name(), "Dominadas");
    Ok(())
}
