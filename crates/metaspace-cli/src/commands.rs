use std::time::SystemTime;

use anyhow::Context;
use colored::Colorize;
use serde_json::{json, Value};
use tracing::debug;

use metaspace_list::{list, ListOptions, Location, ObjectInfo};
use metaspace_types::{
    BucketPrefix, ObjectLocation, ProjectId, SegmentKey, SegmentLocation, SegmentPosition,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::SegmentKey(args) => match args.action {
            SegmentKeyAction::Decode { key } => cmd_segment_key_decode(&key, format),
            SegmentKeyAction::Encode { project, bucket, key, index } => {
                cmd_segment_key_encode(&project, &bucket, &key, index, format)
            }
        },
        Command::BucketPrefix(args) => match args.action {
            BucketPrefixAction::Parse { prefix } => cmd_bucket_prefix_parse(&prefix, format),
        },
        Command::Position(args) => match args.action {
            PositionAction::Encode { part, index } => {
                cmd_position(SegmentPosition::new(part, index), format)
            }
            PositionAction::Decode { value } => cmd_position(SegmentPosition::from(value), format),
        },
        Command::List(args) => cmd_list(args, format),
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn segment_json(seg: &SegmentLocation) -> Value {
    json!({
        "project_id": seg.project_id.to_string(),
        "bucket": seg.bucket_name,
        "index": seg.index.as_i64(),
        "token": seg.index.to_string(),
        "object_key": seg.object_key.to_string(),
        "segment_key": seg.encode().to_string(),
    })
}

fn print_segment(seg: &SegmentLocation, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&segment_json(seg)),
        OutputFormat::Text => {
            let index = if seg.is_last() {
                "last".green().to_string()
            } else {
                seg.index.as_i64().to_string().yellow().to_string()
            };
            println!("Segment key {}", seg.encode().to_string().bold());
            println!("  Project: {}", seg.project_id.to_string().cyan());
            println!("  Bucket:  {}", seg.bucket_name.yellow());
            println!("  Index:   {}", index);
            println!("  Object:  {}", seg.object_key);
            Ok(())
        }
    }
}

fn cmd_segment_key_decode(key: &str, format: OutputFormat) -> anyhow::Result<()> {
    let seg = SegmentKey::from(key)
        .parse()
        .with_context(|| format!("cannot decode segment key {key:?}"))?;
    debug!(key, "decoded segment key");
    print_segment(&seg, format)
}

fn encode_segment(project: &str, bucket: &str, key: &str, index: i64) -> anyhow::Result<SegmentLocation> {
    let project_id = ProjectId::parse(project).context("invalid project id")?;
    let object = ObjectLocation::new(project_id, bucket, key);
    object.verify()?;
    Ok(object.segment(index)?)
}

fn cmd_segment_key_encode(
    project: &str,
    bucket: &str,
    key: &str,
    index: i64,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let seg = encode_segment(project, bucket, key, index)?;
    print_segment(&seg, format)
}

fn cmd_bucket_prefix_parse(prefix: &str, format: OutputFormat) -> anyhow::Result<()> {
    let bucket = BucketPrefix::new(prefix)
        .parse()
        .with_context(|| format!("cannot parse bucket prefix {prefix:?}"))?;
    match format {
        OutputFormat::Json => print_json(&json!({
            "project_id": bucket.project_id.to_string(),
            "bucket": bucket.bucket_name,
        })),
        OutputFormat::Text => {
            println!("{} {}", "✓".green().bold(), bucket.prefix().as_str().bold());
            println!("  Project: {}", bucket.project_id.to_string().cyan());
            println!("  Bucket:  {}", bucket.bucket_name.yellow());
            Ok(())
        }
    }
}

fn cmd_position(pos: SegmentPosition, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "part": pos.part,
            "index": pos.index,
            "encoded": pos.encode(),
        })),
        OutputFormat::Text => {
            println!("{} = {}", pos.to_string().yellow(), pos.encode().to_string().bold());
            Ok(())
        }
    }
}

fn run_listing(args: &ListArgs) -> anyhow::Result<Vec<ObjectInfo>> {
    let prefix = Location::parse(&args.prefix)?;
    let mut locations = args
        .locations
        .iter()
        .map(|s| Location::parse(s))
        .collect::<Result<Vec<_>, _>>()?;
    locations.sort();
    locations.dedup();

    let mut options = ListOptions::new(prefix).recursive(args.recursive);
    options.limit = args.limit;
    options.cursor = args.cursor.as_deref().map(Location::parse).transpose()?;

    let now = SystemTime::now();
    let entries = locations.into_iter().map(move |loc| Ok(ObjectInfo::new(loc, now)));
    Ok(list(entries, &options).collect_all()?)
}

fn cmd_list(args: ListArgs, format: OutputFormat) -> anyhow::Result<()> {
    let infos = run_listing(&args)?;
    debug!(entries = infos.len(), "listing complete");
    match format {
        OutputFormat::Json => {
            let entries: Vec<Value> = infos
                .iter()
                .map(|i| {
                    json!({
                        "location": i.location.to_string(),
                        "is_prefix": i.is_prefix,
                        "status": i.status.token(),
                    })
                })
                .collect();
            print_json(&Value::Array(entries))
        }
        OutputFormat::Text => {
            if infos.is_empty() {
                println!("No entries.");
            }
            for info in &infos {
                if info.is_prefix {
                    println!("  {} {}", "PRE".blue(), info.location.to_string().bold());
                } else {
                    println!("  {} {}", "OBJ".dimmed(), info.location);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

    #[test]
    fn encode_builds_segment_key() {
        let seg = encode_segment(PROJECT, "photos", "a/b.jpg", 2).unwrap();
        assert_eq!(
            seg.encode().to_string(),
            format!("{PROJECT}/s2/photos/a/b.jpg")
        );
        let last = encode_segment(PROJECT, "photos", "a/b.jpg", -1).unwrap();
        assert_eq!(last.encode().to_string(), format!("{PROJECT}/l/photos/a/b.jpg"));
    }

    #[test]
    fn encode_rejects_bad_input() {
        assert!(encode_segment("not-a-uuid", "b", "k", 0).is_err());
        assert!(encode_segment(PROJECT, "b", "k", -2).is_err());
        assert!(encode_segment(PROJECT, "", "k", 0).is_err());
    }

    #[test]
    fn segment_json_fields() {
        let seg = encode_segment(PROJECT, "b", "k", 0).unwrap();
        let v = segment_json(&seg);
        assert_eq!(v["token"], "s0");
        assert_eq!(v["index"], 0);
        assert_eq!(v["bucket"], "b");
        assert_eq!(v["project_id"], PROJECT);
    }

    #[test]
    fn listing_collapses_and_sorts() {
        let args = ListArgs {
            prefix: "sj://b/".into(),
            recursive: false,
            limit: None,
            cursor: None,
            locations: vec!["sj://b/d".into(), "sj://b/a/c".into(), "sj://b/a/b".into()],
        };
        let out: Vec<(String, bool)> = run_listing(&args)
            .unwrap()
            .into_iter()
            .map(|i| (i.location.to_string(), i.is_prefix))
            .collect();
        assert_eq!(
            out,
            vec![("sj://b/a/".to_string(), true), ("sj://b/d".to_string(), false)]
        );
    }

    #[test]
    fn listing_rejects_bad_location() {
        let args = ListArgs {
            prefix: "sj://".into(),
            recursive: true,
            limit: None,
            cursor: None,
            locations: vec![],
        };
        assert!(run_listing(&args).is_err());
    }
}
