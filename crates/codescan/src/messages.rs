//! User-facing text in the configured language.
//!
//! English text is the `Display` output of each type; this module adds the
//! Chinese renderings shown by the mobile app.

use crate::codec::ImportReport;
use crate::config::Language;
use crate::error::{CodecError, GenerateError, HistoryError, ScanError};

/// Renders a value as a message for the user.
pub trait Localize {
    fn localized(&self, language: Language) -> String;
}

impl Localize for GenerateError {
    fn localized(&self, language: Language) -> String {
        if language.resolve() != Language::Zh {
            return self.to_string();
        }
        match self {
            GenerateError::EmptyInput => "请输入要生成的内容".to_string(),
            GenerateError::Ean13WrongLength { length } => format!(
                "EAN-13 需要 12 或 13 位数字，当前为 {length} 个字符。其他内容请使用 CODE_128 或 QR_CODE"
            ),
            GenerateError::Ean13NonDigit {
                character,
                position,
            } => format!(
                "EAN-13 只能包含数字，第 {position} 位为 '{character}'。文本内容请使用 CODE_128 或 QR_CODE"
            ),
            GenerateError::InvalidContent(msg) => format!("内容无效：{msg}"),
            GenerateError::EncoderFailed(msg) => format!("生成失败：{msg}"),
            GenerateError::Unsupported(symbology) => format!("不支持生成 {symbology}"),
        }
    }
}

impl Localize for ScanError {
    fn localized(&self, language: Language) -> String {
        if language.resolve() != Language::Zh {
            return self.to_string();
        }
        match self {
            ScanError::NoCode => "图片中未找到二维码或条形码".to_string(),
            ScanError::EmptyPayload => "未识别到有效二维码".to_string(),
            ScanError::Decode(e) => format!("识别失败：{e}"),
            ScanError::ReadImage { source, .. } => format!("读取图片失败：{source}"),
            ScanError::SpawnFailed(msg) => format!("无法启动扫描：{msg}"),
            ScanError::Store(e) => format!("保存失败：{e}"),
        }
    }
}

impl Localize for CodecError {
    fn localized(&self, language: Language) -> String {
        if language.resolve() != Language::Zh {
            return self.to_string();
        }
        match self {
            CodecError::Parse(e) => format!("导入失败：{e}"),
            CodecError::NotAnArray => "导入失败：需要 JSON 记录数组".to_string(),
            CodecError::ReadFile { source, .. } => format!("读取文件失败：{source}"),
            CodecError::WriteFile { source, .. } => format!("导出失败：{source}"),
            CodecError::Store(e) => format!("导入失败：{e}"),
        }
    }
}

impl Localize for HistoryError {
    fn localized(&self, language: Language) -> String {
        if language.resolve() != Language::Zh {
            return self.to_string();
        }
        match self {
            HistoryError::EmptyContent => "内容不能为空".to_string(),
            HistoryError::NotFound(id) => format!("未找到记录 {id}"),
            HistoryError::Store(e) => e.to_string(),
        }
    }
}

impl Localize for ImportReport {
    fn localized(&self, language: Language) -> String {
        match language.resolve() {
            Language::Zh => format!("导入成功：{} / {} 条记录", self.inserted, self.total),
            _ => format!("Imported {self} records"),
        }
    }
}
