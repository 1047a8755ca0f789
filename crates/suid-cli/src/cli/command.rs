use std::io::Write;

use suid::{Base32Ext, Guid, GuidGenerator, Id, Suid, SuidGenerator, SystemClock};

use super::config::{Action, AnyId, CliConfig, Kind};

/// Executes the configured action, writing results to `out`.
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> anyhow::Result<()> {
    match &config.action {
        Action::New {
            kind,
            group,
            count,
            raw,
        } => {
            tracing::debug!(host = config.host.id, source = ?config.host.source, "generating");
            match kind {
                Kind::Suid => {
                    let generator = SuidGenerator::new(config.host.id, SystemClock)?;
                    for _ in 0..*count {
                        let id = generator.next_id();
                        if *raw {
                            writeln!(out, "{}", i64::from(id))?;
                        } else {
                            writeln!(out, "{id}")?;
                        }
                    }
                }
                Kind::Guid => {
                    let generator = GuidGenerator::new(config.host.id, SystemClock)?;
                    for _ in 0..*count {
                        let id = generator.next_id_in(*group);
                        if *raw {
                            writeln!(out, "{}", hex(&id.to_bytes()))?;
                        } else {
                            writeln!(out, "{id}")?;
                        }
                    }
                }
            }
        }
        Action::Inspect(id) => inspect(id, out)?,
    }
    Ok(())
}

fn inspect<W: Write>(id: &AnyId, out: &mut W) -> anyhow::Result<()> {
    match id {
        AnyId::Suid(id) => {
            writeln!(out, "kind      : suid (layout v{})", <Suid as Id>::LAYOUT_VERSION)?;
            writeln!(out, "text      : {}", id.encode())?;
            writeln!(out, "raw       : {}", id.to_raw())?;
            writeln!(out, "time      : {} s", id.time())?;
            writeln!(out, "timestamp : {:?}", id.timestamp())?;
            writeln!(out, "sequence  : {}", id.sequence())?;
            writeln!(out, "host      : {}", id.host())?;
            writeln!(out, "verified  : {}", id.verify())?;
        }
        AnyId::Guid(id) => {
            writeln!(out, "kind      : guid (layout v{})", <Guid as Id>::LAYOUT_VERSION)?;
            writeln!(out, "text      : {}", id.encode())?;
            writeln!(out, "raw       : {}", hex(&id.to_bytes()))?;
            writeln!(out, "group     : {}", id.group())?;
            writeln!(out, "time      : {} us", id.time())?;
            writeln!(out, "timestamp : {:?}", id.timestamp())?;
            writeln!(out, "sequence  : {}", id.sequence())?;
            writeln!(out, "host      : {}", id.host())?;
            writeln!(out, "verified  : {}", id.verify())?;
        }
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
