#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rota::{
    generator, io,
    model::{Dataset, LeaveInterval, Member, MemberId, ShiftDefinition, ShiftId},
    notification::{prepare_notice, TextNotice},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de gestion de rotas (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du jeu de données
    #[arg(long, global = true, default_value = "dataset.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre
    AddMember {
        #[arg(long)]
        name: String,
        /// ids de créneaux "s1,s2,..."
        #[arg(long)]
        shifts: Option<String>,
        /// jours "mon,tue,..."
        #[arg(long)]
        days: Option<String>,
    },

    /// Définir un créneau récurrent
    DefineShift {
        #[arg(long)]
        name: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM
        #[arg(long)]
        end: String,
        #[arg(long, default_value_t = 1)]
        headcount: u32,
        /// jours "mon,tue,..."
        #[arg(long)]
        days: String,
    },

    /// Enregistrer un congé
    AddLeave {
        /// id ou nom du membre
        #[arg(long)]
        member: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD
        #[arg(long)]
        end: String,
    },

    /// Importer des membres depuis un CSV
    ImportMembers {
        #[arg(long)]
        csv: String,
    },

    /// Importer des créneaux depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Importer des congés depuis un CSV
    ImportLeaves {
        #[arg(long)]
        csv: String,
    },

    /// Lister le jeu de données
    List,

    /// Générer la rota sur une plage de dates (bornes incluses)
    Generate {
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD
        #[arg(long)]
        end: String,
        /// Export JSON (optionnel)
        #[arg(long)]
        out: Option<String>,
        /// Export CSV (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier une rota générée contre le jeu de données
    Check {
        #[arg(long)]
        rota: String,
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Remplacer un membre sur une entrée de la rota
    Swap {
        #[arg(long)]
        rota: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// id du créneau
        #[arg(long)]
        shift: String,
        /// id ou nom du membre sortant
        #[arg(long)]
        from: String,
        /// id ou nom du membre entrant
        #[arg(long)]
        to: String,
    },

    /// Générer l'avis de service d'un membre
    Notify {
        #[arg(long)]
        rota: String,
        /// id ou nom du membre
        #[arg(long)]
        member: String,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn resolve_member(dataset: &Dataset, key: &str) -> Result<MemberId> {
    if let Some(m) = dataset.find_member(&MemberId::new(key)) {
        return Ok(m.id.clone());
    }
    if let Some(m) = dataset.find_member_by_name(key) {
        return Ok(m.id.clone());
    }
    bail!("unknown member: {key}")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let mut dataset = storage.load().unwrap_or_default();

    let code = match cli.cmd {
        Commands::AddMember { name, shifts, days } => {
            let mut member = Member::new(name);
            if let Some(list) = shifts {
                member.shifts = list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ShiftId::new)
                    .collect();
            }
            if let Some(list) = days {
                member.days = io::parse_days(&list)?;
            }
            println!("member {} added with id {}", member.name, member.id.as_str());
            dataset.members.push(member);
            dataset.validate()?;
            storage.save(&dataset)?;
            0
        }
        Commands::DefineShift {
            name,
            start,
            end,
            headcount,
            days,
        } => {
            let start = io::parse_time(&start)?;
            let end = io::parse_time(&end)?;
            let mut shift =
                ShiftDefinition::new(name, start, end, headcount).map_err(anyhow::Error::msg)?;
            shift.days = io::parse_days(&days)?;
            println!("shift {} defined with id {}", shift.name, shift.id.as_str());
            dataset.shifts.push(shift);
            dataset.validate()?;
            storage.save(&dataset)?;
            0
        }
        Commands::AddLeave { member, start, end } => {
            let member_id = resolve_member(&dataset, &member)?;
            let start = io::parse_date(&start)?;
            let end = io::parse_date(&end)?;
            let leave =
                LeaveInterval::new(member_id, start, end).map_err(anyhow::Error::msg)?;
            dataset.leaves.push(leave);
            dataset.validate()?;
            storage.save(&dataset)?;
            println!("leave recorded ({start} / {end})");
            0
        }
        Commands::ImportMembers { csv } => {
            let members = io::import_members_csv(csv)?;
            println!("imported {} member(s)", members.len());
            dataset.members.extend(members);
            dataset.validate()?;
            storage.save(&dataset)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv)?;
            println!("imported {} shift(s)", shifts.len());
            dataset.shifts.extend(shifts);
            dataset.validate()?;
            storage.save(&dataset)?;
            0
        }
        Commands::ImportLeaves { csv } => {
            let leaves = io::import_leaves_csv(csv)?;
            println!("imported {} leave(s)", leaves.len());
            dataset.leaves.extend(leaves);
            dataset.validate()?;
            storage.save(&dataset)?;
            0
        }
        Commands::List => {
            for s in &dataset.shifts {
                let days = s
                    .days
                    .iter()
                    .map(|d| io::day_token(*d))
                    .collect::<Vec<_>>()
                    .join(",");
                println!(
                    "shift {} | {} | {} → {} | effectif {} | {}",
                    s.id.as_str(),
                    s.name,
                    s.start.format("%H:%M"),
                    s.end.format("%H:%M"),
                    s.headcount,
                    days
                );
            }
            for m in &dataset.members {
                let days = m
                    .days
                    .iter()
                    .map(|d| io::day_token(*d))
                    .collect::<Vec<_>>()
                    .join(",");
                let leave_days: i64 = dataset
                    .leaves
                    .iter()
                    .filter(|l| l.member_id == m.id)
                    .map(|l| l.days())
                    .sum();
                println!(
                    "member {} | {} | jours {} | congés {} j",
                    m.id.as_str(),
                    m.name,
                    days,
                    leave_days
                );
            }
            0
        }
        Commands::Generate {
            start,
            end,
            out,
            out_csv,
        } => {
            dataset.validate()?;
            let start = io::parse_date(&start)?;
            let end = io::parse_date(&end)?;
            let rota = dataset.generate(start, end)?;
            if let Some(path) = out {
                io::export_rota_json(path, &rota)?;
            }
            if let Some(path) = out_csv {
                io::export_rota_csv(path, &rota)?;
            }
            // impression compacte
            for e in &rota.entries {
                let assigned = if e.assigned.is_empty() {
                    "-".to_string()
                } else {
                    e.assigned
                        .iter()
                        .map(MemberId::as_str)
                        .collect::<Vec<_>>()
                        .join(",")
                };
                println!("{} | {} | {} | manque={}", e.date, e.shift_name, assigned, e.shortage);
            }
            let shortage = rota.total_shortage();
            if shortage > 0 {
                eprintln!("Warning: {shortage} unfilled slot(s)");
            }
            0
        }
        Commands::Check { rota, report } => {
            let rota = io::load_rota_json(rota)?;
            let violations = generator::detect_violations(&rota, &dataset);
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    eprintln!("  {v}");
                }
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["kind", "detail"])?;
                    for v in &violations {
                        w.write_record([v.kind(), v.to_string().as_str()])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Swap {
            rota: rota_path,
            date,
            shift,
            from,
            to,
        } => {
            let mut rota = io::load_rota_json(&rota_path)?;
            let date = io::parse_date(&date)?;
            let shift = ShiftId::new(shift);
            let from = resolve_member(&dataset, &from)?;
            let to = resolve_member(&dataset, &to)?;
            generator::swap(&mut rota, &dataset, date, &shift, &from, &to)?;
            io::export_rota_json(&rota_path, &rota)?;
            println!("swap applied on {} for shift {}", date, shift.as_str());
            0
        }
        Commands::Notify { rota, member, out } => {
            let rota = io::load_rota_json(rota)?;
            let member_id = resolve_member(&dataset, &member)?;
            let renderer = TextNotice;
            let notice = prepare_notice(&rota, &dataset, &member_id, &renderer)?;
            std::fs::write(&out, notice.content)?;
            println!(
                "Notice generated for {} ({} duties)",
                notice.member_name, notice.duty_count
            );
            0
        }
    };

    std::process::exit(code);
}
