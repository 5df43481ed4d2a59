//! Настройки партии для группы: таймеры и режим игры.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретной партии.
//! Таймеры здесь только значения для внешнего планировщика, движок часов не держит.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::table::{HAND_SIZE, NUM_SEATS};

/// Допустимый таймер на сбор игроков (сек).
pub const JOIN_TIMER_RANGE: RangeInclusive<u32> = 10..=60;
/// Допустимый таймер на ход (сек).
pub const PASS_TIMER_RANGE: RangeInclusive<u32> = 20..=120;

/// Сколько раз проигрыш может удвоиться в худшем случае:
/// 10+ карт, четыре двойки, все 13 карт, ходил только победитель, бомба.
pub const MAX_STAKE_DOUBLINGS: u32 = 8;

/// Наибольшая базовая ставка, при которой проигрыш трёх игроков помещается в i64.
pub const MAX_BASE_UNIT: u64 =
    i64::MAX as u64 / ((HAND_SIZE as u64) << MAX_STAKE_DOUBLINGS) / (NUM_SEATS as u64 - 1);

/// Режим игры.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Без денег, только статистика.
    #[default]
    Normal,
    /// Проигравшие платят победителю.
    Money,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Таймер сбора можно выставить только от 10 до 60 секунд (получено {0})")]
    JoinTimerOutOfRange(u32),

    #[error("Таймер хода можно выставить только от 20 до 120 секунд (получено {0})")]
    PassTimerOutOfRange(u32),

    #[error("Базовая ставка должна быть больше нуля")]
    ZeroBaseUnit,

    #[error("Базовая ставка {0} слишком велика")]
    BaseUnitTooLarge(u64),

    #[error("Лимит пасов по таймеру должен быть больше нуля")]
    ZeroIdleLimit,

    #[error("Некорректный JSON настроек: {0}")]
    Malformed(String),
}

/// Настройки одной группы (одного "стола").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
    /// Сколько секунд ждём, пока наберутся 4 игрока.
    pub join_timer_secs: u32,
    /// Сколько секунд даётся на ход до автоматического паса.
    pub pass_timer_secs: u32,
    pub mode: GameMode,
    /// Цена одной оставшейся карты в денежном режиме.
    pub base_unit: Chips,
    /// Сколько принудительных пасов подряд терпим, прежде чем закрыть партию.
    pub idle_pass_limit: u8,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameSettings {
    /// Стандартный профиль: 60 сек на сбор, 45 сек на ход, без денег.
    pub const fn standard() -> Self {
        Self {
            join_timer_secs: 60,
            pass_timer_secs: 45,
            mode: GameMode::Normal,
            base_unit: Chips(5),
            idle_pass_limit: 4,
        }
    }

    pub fn with_join_timer(mut self, secs: u32) -> Result<Self, SettingsError> {
        if !JOIN_TIMER_RANGE.contains(&secs) {
            return Err(SettingsError::JoinTimerOutOfRange(secs));
        }
        self.join_timer_secs = secs;
        Ok(self)
    }

    pub fn with_pass_timer(mut self, secs: u32) -> Result<Self, SettingsError> {
        if !PASS_TIMER_RANGE.contains(&secs) {
            return Err(SettingsError::PassTimerOutOfRange(secs));
        }
        self.pass_timer_secs = secs;
        Ok(self)
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_money_mode(&self) -> bool {
        self.mode == GameMode::Money
    }

    /// Полная проверка (например, после загрузки из JSON).
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !JOIN_TIMER_RANGE.contains(&self.join_timer_secs) {
            return Err(SettingsError::JoinTimerOutOfRange(self.join_timer_secs));
        }
        if !PASS_TIMER_RANGE.contains(&self.pass_timer_secs) {
            return Err(SettingsError::PassTimerOutOfRange(self.pass_timer_secs));
        }
        if self.base_unit.is_zero() {
            return Err(SettingsError::ZeroBaseUnit);
        }
        if self.base_unit.0 > MAX_BASE_UNIT {
            return Err(SettingsError::BaseUnitTooLarge(self.base_unit.0));
        }
        if self.idle_pass_limit == 0 {
            return Err(SettingsError::ZeroIdleLimit);
        }
        Ok(())
    }

    /// Загрузить и проверить настройки из JSON. Отсутствующие поля берутся из `standard()`.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings =
            serde_json::from_str(json).map_err(|e| SettingsError::Malformed(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}
