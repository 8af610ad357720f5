//! Wire shapes of the Media Services management API (`Microsoft.Media`).
//!
//! Only the fields these functions read or write are modelled; everything else
//! in the payloads is ignored on deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: AssetProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetProperties {
    /// Platform-assigned GUID, distinct from the asset name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `PUT .../assets/{name}` body. An empty property bag lets the platform pick
/// the storage account and derive the container name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetInput {
    pub properties: AssetProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub value: Vec<Asset>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AssetContainerPermission {
    Read,
    ReadWrite,
    ReadWriteDelete,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContainerSasInput {
    pub permissions: AssetContainerPermission,
    /// RFC 3339, UTC.
    pub expiry_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetContainerSas {
    #[serde(default)]
    pub asset_container_sas_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: TransformProperties,
}

/// `PUT .../transforms/{name}` body.
#[derive(Debug, Clone, Serialize)]
pub struct TransformInput {
    pub properties: TransformProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransformProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub outputs: Vec<TransformOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub preset: Preset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_priority: Option<String>,
}

impl TransformOutput {
    pub fn builtin(preset_name: EncoderNamedPreset) -> Self {
        Self {
            preset: Preset::BuiltInStandardEncoder { preset_name },
            on_error: None,
            relative_priority: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "@odata.type")]
pub enum Preset {
    #[serde(rename = "#Microsoft.Media.BuiltInStandardEncoderPreset", rename_all = "camelCase")]
    BuiltInStandardEncoder { preset_name: EncoderNamedPreset },
    /// Custom encoder, analyzer and face-detector presets are passed through untouched.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EncoderNamedPreset {
    AdaptiveStreaming,
    ContentAwareEncoding,
    #[serde(rename = "H264MultipleBitrate1080p")]
    H264MultipleBitrate1080p,
    #[serde(rename = "H264SingleBitrate1080p")]
    H264SingleBitrate1080p,
    #[serde(rename = "AACGoodQualityAudio")]
    AacGoodQualityAudio,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArmErrorResponse {
    pub error: ArmErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArmErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
