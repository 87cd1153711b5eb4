use super::*;

fn controls() -> Controls {
    Controls::new(
        ControlConfig::default(),
        TuningState::default(),
        SignalFlags::default(),
    )
}

#[test]
fn noise_and_sync_offsets_never_go_negative() {
    let mut c = controls();
    c.apply(Command::IncreaseNoise);
    c.apply(Command::IncreaseHorizontalSync);
    for _ in 0..10 {
        c.apply(Command::DecreaseNoise);
        c.apply(Command::DecreaseHorizontalSync);
        c.apply(Command::DecreaseVerticalSync);
    }
    assert_eq!(c.tuning.noise, 0);
    assert_eq!(c.tuning.hsync, 0);
    assert_eq!(c.tuning.vsync, 0);
}

#[test]
fn unclamped_knobs_may_go_negative() {
    let mut c = controls();
    c.apply(Command::DecreaseBrightness);
    c.apply(Command::RollDown);
    c.apply(Command::RollDown);
    assert_eq!(c.tuning.brightness, -1);
    assert_eq!(c.tuning.roll, -2);
}

#[test]
fn noise_step_follows_config() {
    let cfg = ControlConfig {
        noise_step: 5,
        ..ControlConfig::default()
    };
    let mut c = Controls::new(cfg, TuningState::default(), SignalFlags::default());
    c.apply(Command::IncreaseNoise);
    c.apply(Command::IncreaseNoise);
    assert_eq!(c.tuning.noise, 10);
    c.apply(Command::DecreaseNoise);
    assert_eq!(c.tuning.noise, 5);
}

#[test]
fn stepping_from_five_forward_twice_back_once_lands_on_six() {
    let cfg = ControlConfig {
        initial_frame: 5,
        ..ControlConfig::default()
    };
    let mut c = Controls::new(cfg, TuningState::default(), SignalFlags::default());
    c.enable_playback(false);
    c.apply(Command::StepForward);
    c.apply(Command::StepForward);
    c.apply(Command::StepBackward);
    assert_eq!(c.playback.current, FrameIndex(6));
}

#[test]
fn stepping_backward_clamps_at_one() {
    let mut c = controls();
    c.enable_playback(false);
    for _ in 0..50 {
        c.apply(Command::StepBackward);
    }
    assert_eq!(c.playback.current, FrameIndex(1));
}

#[test]
fn transport_is_ignored_without_playback() {
    let mut c = controls();
    assert_eq!(c.apply(Command::StepForward), Applied::Ignored);
    assert_eq!(c.apply(Command::TogglePlay), Applied::Ignored);
    assert_eq!(c.playback.current, FrameIndex(1));
    assert!(!c.playback.playing);
}

#[test]
fn reset_restores_flags_but_keeps_picture_knobs() {
    let cfg = ControlConfig {
        initial_frame: 3,
        ..ControlConfig::default()
    };
    let mut c = Controls::new(cfg, TuningState::default(), SignalFlags::default());
    c.enable_playback(true);
    c.apply(Command::ToggleColor);
    c.apply(Command::ToggleProgressive);
    c.apply(Command::ToggleField);
    c.apply(Command::ToggleRaw);
    c.apply(Command::IncreaseBrightness);
    c.apply(Command::DecreaseContrast);
    c.apply(Command::IncreaseSaturation);
    c.apply(Command::IncreaseWhitePoint);
    c.apply(Command::StepForward);
    let before = c.tuning;

    assert_eq!(c.apply(Command::Reset), Applied::EngineReset);
    assert_eq!(c.flags, SignalFlags::default());
    assert!(c.flags.color && c.flags.progressive && !c.flags.field && !c.flags.raw);
    assert_eq!(c.tuning, before);
    assert_eq!(c.playback.current, FrameIndex(3));
}

#[test]
fn config_validation_rejects_bad_values() {
    let bad_step = ControlConfig {
        noise_step: 0,
        ..ControlConfig::default()
    };
    assert!(bad_step.validate().is_err());

    let bad_frame = ControlConfig {
        initial_frame: 0,
        ..ControlConfig::default()
    };
    assert!(bad_frame.validate().is_err());

    let bad_tuning = TuningState {
        noise: -1,
        ..TuningState::default()
    };
    assert!(bad_tuning.validate().is_err());
}

#[test]
fn knobs_saturate_at_the_integer_limits() {
    let cfg = ControlConfig {
        noise_step: i32::MAX,
        ..ControlConfig::default()
    };
    cfg.validate().unwrap();
    let tuning = TuningState {
        brightness: i32::MAX,
        roll: i32::MIN,
        hsync: i32::MAX,
        ..TuningState::default()
    };
    let mut c = Controls::new(cfg, tuning, SignalFlags::default());

    c.apply(Command::IncreaseNoise);
    c.apply(Command::IncreaseNoise);
    c.apply(Command::IncreaseBrightness);
    c.apply(Command::RollDown);
    c.apply(Command::IncreaseHorizontalSync);
    assert_eq!(c.tuning.noise, i32::MAX);
    assert_eq!(c.tuning.brightness, i32::MAX);
    assert_eq!(c.tuning.roll, i32::MIN);
    assert_eq!(c.tuning.hsync, i32::MAX);

    c.apply(Command::DecreaseNoise);
    c.apply(Command::DecreaseNoise);
    assert_eq!(c.tuning.noise, 0);
}
