//! 渲染后的清单 -> DynamicObject
//!
//! 清单按 YAML 解析（JSON 也是合法 YAML）；apiVersion / kind 必填。

use kube::api::DynamicObject;

use crate::core::ReconcileError;

/// 解析清单；未写 metadata.namespace 时补上作业所在命名空间
pub fn decode_manifest(manifest: &str, namespace: &str) -> Result<DynamicObject, ReconcileError> {
    let mut obj: DynamicObject = serde_yaml::from_str(manifest)
        .map_err(|e| ReconcileError::Manifest(e.to_string()))?;

    match &obj.types {
        Some(types) if !types.api_version.is_empty() && !types.kind.is_empty() => {}
        _ => {
            return Err(ReconcileError::Manifest(
                "manifest must set apiVersion and kind".to_string(),
            ))
        }
    }

    if obj.metadata.namespace.is_none() {
        obj.metadata.namespace = Some(namespace.to_string());
    }
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::ResourceExt;

    #[test]
    fn test_decode_yaml_manifest() {
        let manifest = "apiVersion: core.cerit.cz/v1
kind: ScavengerJob
metadata:
  name: scav-123
spec:
  image: busybox
";
        let obj = decode_manifest(manifest, "batch").unwrap();
        assert_eq!(obj.name_any(), "scav-123");
        assert_eq!(obj.namespace().as_deref(), Some("batch"));
        let types = obj.types.as_ref().unwrap();
        assert_eq!(types.kind, "ScavengerJob");
        assert_eq!(obj.data["spec"]["image"], "busybox");
    }

    #[test]
    fn test_decode_json_manifest_keeps_namespace() {
        let manifest = r#"{"apiVersion": "core.cerit.cz/v1", "kind": "ScavengerJob",
            "metadata": {"name": "scav-1", "namespace": "explicit"}}"#;
        let obj = decode_manifest(manifest, "batch").unwrap();
        assert_eq!(obj.namespace().as_deref(), Some("explicit"));
    }

    #[test]
    fn test_missing_kind_rejected() {
        let manifest = "metadata:\n  name: scav-1\n";
        let err = decode_manifest(manifest, "batch").unwrap_err();
        assert!(matches!(err, ReconcileError::Manifest(_)));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = decode_manifest("kind: [unclosed", "batch").unwrap_err();
        assert!(matches!(err, ReconcileError::Manifest(_)));
    }
}
