use cmdtrace_core::{diff, ApplyError, CaptureConfig, CaptureList, CmdId, StateWriter, Writer};
use cmdtrace_test_utils::{
    capture_list, entry, init_tracing, CmdA, CmdB, CmdFail, SpyWriter, TestState, Untagged,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_writes_apply_in_call_order_not_id_order() {
    init_tracing();
    let mut state = TestState::default();
    let mut writer = StateWriter::new(&mut state);

    writer.write_command(CmdId(5), CmdA::new(5, 10)).unwrap();
    writer.write_command(CmdId(3), CmdB::new(3, "x")).unwrap();
    let captured = writer.into_list();

    assert_eq!(captured, capture_list![CmdA::new(5, 10), CmdB::new(3, "x")]);
    assert_eq!(state.ids(), vec![CmdId(5), CmdId(3)]);
    assert_eq!(state.labels(), vec!["A10", "Bx"]);
    assert_eq!(state.total, 10);
}

#[test]
fn test_command_sees_writer_supplied_id() {
    // the writer's id wins over the command's own field during mutation
    let mut writer = StateWriter::owned(TestState::default());
    writer.write_command(CmdId(99), CmdA::new(1, 2)).unwrap();

    assert_eq!(writer.state().map(TestState::ids), Some(vec![CmdId(99)]));
    assert_eq!(writer.captured().ids().collect::<Vec<_>>(), vec![CmdId(99)]);
}

#[test]
fn test_failed_write_is_not_captured() {
    init_tracing();
    let mut writer = StateWriter::owned(TestState::default());
    writer.write_command(CmdId(1), CmdA::new(1, 4)).unwrap();
    writer.write_command(CmdId(2), CmdB::new(2, "ok")).unwrap();

    let err = writer
        .write_command(CmdId(3), CmdFail::new("broken"))
        .unwrap_err();
    assert_eq!(
        err,
        ApplyError::Rejected {
            id: CmdId(3),
            reason: "broken".to_string()
        }
    );

    let (state, captured) = writer.into_parts();
    let state = state.unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured, capture_list![CmdA::new(1, 4), CmdB::new(2, "ok")]);
    assert_eq!(state.labels(), vec!["A4", "Bok"]);
}

#[test]
fn test_writer_continues_after_failure() {
    let mut writer = StateWriter::owned(TestState::default());
    writer.write_command(CmdId(1), CmdA::new(1, 1)).unwrap();
    assert!(writer.write_command(CmdId(2), CmdFail::new("no")).is_err());
    writer.write_command(CmdId(3), CmdA::new(3, 2)).unwrap();

    assert_eq!(
        writer.captured().ids().collect::<Vec<_>>(),
        vec![CmdId(1), CmdId(3)]
    );
    assert_eq!(writer.state().map(|s| s.total), Some(3));
}

#[test]
fn test_detached_writer_records_without_mutation() {
    let mut writer = StateWriter::<TestState>::detached();
    writer.write_command(CmdId(2), Untagged::new("n")).unwrap();
    // a failing command is never applied, so it is captured
    writer.write_command(CmdId(1), CmdFail::new("skip")).unwrap();

    assert!(writer.state().is_none());
    assert_eq!(
        writer.into_list(),
        capture_list![entry(2, Untagged::new("n")), entry(1, CmdFail::new("skip"))]
    );
}

#[test]
fn test_capture_list_is_a_writer() {
    let mut list = CaptureList::<TestState>::new();
    list.write_command(CmdId(8), CmdB::new(8, "l")).unwrap();
    list.write_command(CmdId(4), CmdA::new(4, 0)).unwrap();

    assert!(list.state().is_none());
    assert_eq!(list, capture_list![CmdB::new(8, "l"), CmdA::new(4, 0)]);
}

#[test]
fn test_spy_writer_keeps_bare_commands() {
    let mut spy = SpyWriter::new(TestState::default());
    spy.write_command(CmdId(3), CmdA::new(3, 1)).unwrap();
    spy.write_command(CmdId(1), CmdB::new(1, "z")).unwrap();

    assert_eq!(spy.commands.len(), 2);
    assert!(spy.commands[0].eq_command(&CmdA::new(3, 1)));
    let captured: Vec<_> = spy.entries.commands().collect();
    assert!(captured[1].eq_command(&CmdB::new(1, "z")));
    assert_eq!(spy.state.map(|s| s.total), Some(1));
}

#[test]
fn test_spy_without_state_matches_recorder() {
    let mut spy = SpyWriter::without_state();
    let mut recorder = StateWriter::owned(TestState::default());
    write_all(&mut spy, &[4, 1, 3]);
    write_all(&mut recorder, &[4, 1, 3]);

    assert!(spy.state().is_none());
    assert_eq!(&spy.entries, recorder.captured());
    assert_eq!(spy.commands.len(), 3);
}

#[test]
fn test_config_does_not_change_capture() {
    init_tracing();
    let config = CaptureConfig::from_toml_str(
        "session = \"dup-check\"\ninitial_capacity = 4\nwarn_on_duplicate_ids = true\n",
    )
    .unwrap();
    let mut configured = StateWriter::owned(TestState::default()).with_config(config);
    let mut plain = StateWriter::owned(TestState::default());

    for writer in [&mut configured, &mut plain] {
        writer.write_command(CmdId(1), CmdA::new(1, 1)).unwrap();
        writer.write_command(CmdId(1), CmdA::new(1, 2)).unwrap();
    }

    assert_eq!(configured.config().session, "dup-check");
    assert_eq!(configured.captured(), plain.captured());
    assert_eq!(configured.state(), plain.state());
}

fn write_all<W: Writer<TestState>>(writer: &mut W, ids: &[u64]) {
    for (i, &id) in ids.iter().enumerate() {
        let value = i64::try_from(i).unwrap_or(i64::MAX);
        if i % 2 == 0 {
            writer.write_command(CmdId(id), CmdA::new(id, value)).unwrap();
        } else {
            writer
                .write_command(CmdId(id), CmdB::new(id, &value.to_string()))
                .unwrap();
        }
    }
}

proptest! {
    #[test]
    fn prop_capture_order_equals_call_order(ids in prop::collection::vec(any::<u64>(), 0..40)) {
        let mut writer = StateWriter::owned(TestState::default());
        write_all(&mut writer, &ids);
        let (state, captured) = writer.into_parts();

        let expected: Vec<CmdId> = ids.iter().copied().map(CmdId).collect();
        prop_assert_eq!(captured.ids().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(state.map(|s| s.ids()), Some(expected));
    }

    #[test]
    fn prop_detached_capture_matches_stateful(ids in prop::collection::vec(0u64..1000, 0..40)) {
        let mut with_state = StateWriter::owned(TestState::default());
        let mut without_state = StateWriter::<TestState>::detached();
        write_all(&mut with_state, &ids);
        write_all(&mut without_state, &ids);

        let a = with_state.into_list();
        let b = without_state.into_list();
        prop_assert!(diff(&a, &b).is_none());
        prop_assert_eq!(a, b);
    }
}
