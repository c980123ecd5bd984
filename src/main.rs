//! Command-line interface for fes20

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use fes20::datatypes;
#[cfg(feature = "cli")]
use fes20::registry::{ClassDescriptor, Classifier, DataTypeKind, FeatureDescriptor, FeatureKind, TypeRef, UNBOUNDED};
#[cfg(feature = "cli")]
use fes20::validation::Severity;
#[cfg(feature = "cli")]
use fes20::{fes20, Diagnostician, Fes20Factory, Registry, Value, XmlReader, XmlWriter};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "fes20")]
#[command(author, version, about = "OGC Filter Encoding 2.0 model inspection and checking tool", long_about = None)]
struct Cli {
    /// Log registry, parsing and validation activity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the classifiers of the package
    Classes {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the feature table of a class
    Features {
        /// Class name, e.g. BinaryComparisonOpType
        #[arg(value_name = "CLASS")]
        class: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Parse a literal of a simple type
    Parse {
        /// Datatype name, e.g. VersionType
        #[arg(value_name = "DATATYPE")]
        datatype: String,

        /// Lexical value
        #[arg(value_name = "LITERAL")]
        literal: String,
    },

    /// Read an FES document and check it
    Check {
        /// Path to the XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the document as re-serialized after reading
        #[arg(short, long)]
        echo: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Classes { json } => cmd_classes(json),
        Commands::Features { class, json } => cmd_features(&class, json),
        Commands::Parse { datatype, literal } => cmd_parse(&datatype, &literal),
        Commands::Check { file, echo } => cmd_check(file, echo),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn cmd_classes(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = fes20()?;

    if json_output {
        let entries: Vec<serde_json::Value> = registry
            .classifiers()
            .iter()
            .map(|classifier| match classifier {
                Classifier::Class(class) => serde_json::json!({
                    "id": class.id,
                    "name": class.name,
                    "kind": "class",
                    "abstract": class.is_abstract,
                    "xml_name": class.xml_name,
                    "features": class.feature_count(),
                }),
                Classifier::DataType(data_type) => serde_json::json!({
                    "id": data_type.id,
                    "name": data_type.name,
                    "kind": if data_type.is_enumeration() { "enum" } else { "datatype" },
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Package: {} ({})", registry.name(), registry.ns_uri());
    for classifier in registry.classifiers() {
        match classifier {
            Classifier::Class(class) => {
                let marker = if class.is_abstract { " (abstract)" } else { "" };
                println!(
                    "  {:>3}  class     {}{}  [{} features]",
                    class.id,
                    class.name,
                    marker,
                    class.feature_count()
                );
            }
            Classifier::DataType(data_type) => {
                let kind = if data_type.is_enumeration() { "enum" } else { "datatype" };
                println!("  {:>3}  {:<8}  {}", data_type.id, kind, data_type.name);
            }
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_features(class_name: &str, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = fes20()?;
    let class = match registry.classifier_by_name(class_name) {
        Some(Classifier::Class(class)) => class,
        _ => return Err(format!("The class '{}' is not a valid classifier", class_name).into()),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(class)?);
        return Ok(());
    }

    print_class_header(registry, class);
    for feature in class.features() {
        println!(
            "  {:>3}  {:<28} {:<11} {:<34} {:<6} {}",
            feature.id,
            feature.name,
            feature_kind(feature),
            type_name(registry, &feature.type_ref),
            bounds(feature),
            flags(feature)
        );
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_class_header(registry: &Registry, class: &ClassDescriptor) {
    println!("Class: {}", class.name);
    println!("  Id:       {}", class.id);
    println!("  Abstract: {}", class.is_abstract);
    let supertypes: Vec<String> = class.supertypes.iter().map(|s| registry.classifier_name(*s)).collect();
    if !supertypes.is_empty() {
        println!("  Extends:  {}", supertypes.join(", "));
    }
    println!("  XML name: {}", class.xml_name);
    println!(
        "  Features: {} ({} inherited)",
        class.feature_count(),
        class.inherited_count()
    );
    println!();
}

#[cfg(feature = "cli")]
fn feature_kind(feature: &FeatureDescriptor) -> &'static str {
    match feature.kind {
        FeatureKind::Attribute => "attribute",
        FeatureKind::Reference { containment: true, .. } => "containment",
        FeatureKind::Reference { .. } => "reference",
    }
}

#[cfg(feature = "cli")]
fn type_name(registry: &Registry, type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Classifier(id) => registry.classifier_name(*id),
        TypeRef::Xml(xml_type) => format!("xs:{}", xml_type.name()),
        TypeRef::Runtime(runtime) => format!("{:?}", runtime),
        TypeRef::External { name, .. } => format!("ows:{}", name),
    }
}

#[cfg(feature = "cli")]
fn bounds(feature: &FeatureDescriptor) -> String {
    let upper = if feature.upper_bound == UNBOUNDED {
        "*".to_string()
    } else {
        feature.upper_bound.to_string()
    };
    format!("{}..{}", feature.lower_bound, upper)
}

#[cfg(feature = "cli")]
fn flags(feature: &FeatureDescriptor) -> String {
    let mut flags = Vec::new();
    if feature.is_derived() {
        flags.push("derived");
    }
    if !feature.is_changeable() {
        flags.push("read-only");
    }
    if feature.is_unsettable() {
        flags.push("unsettable");
    }
    flags.join(",")
}

#[cfg(feature = "cli")]
fn cmd_parse(datatype: &str, literal: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = fes20()?;
    let id = match registry.classifier_by_name(datatype) {
        Some(classifier) => classifier.id(),
        None => return Err(format!("The datatype '{}' is not a valid classifier", datatype).into()),
    };
    let factory = Fes20Factory::new(registry);
    let value = factory.create_from_string(id, literal)?;
    let data_type = registry.data_type(id)?;

    let member = match &data_type.kind {
        DataTypeKind::Union { members } => members
            .iter()
            .find(|m| datatypes::accepts_typed(registry, m, &value))
            .map(|m| type_name(registry, m))
            .unwrap_or_else(|| data_type.name.clone()),
        _ => data_type.name.clone(),
    };

    println!("Datatype: {}", data_type.name);
    println!("Member:   {}", member);
    println!("Kind:     {}", value_kind(registry, &value));
    println!("Value:    {}", factory.convert_to_string(id, &value)?);
    Ok(())
}

#[cfg(feature = "cli")]
fn value_kind(registry: &Registry, value: &Value) -> String {
    match value {
        Value::Enum(literal) => format!("enum {}", registry.classifier_name(literal.classifier())),
        Value::List(items) => format!("list of {}", items.len()),
        other => other.kind().to_string(),
    }
}

#[cfg(feature = "cli")]
fn cmd_check(file: PathBuf, echo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = fes20()?;
    let document = XmlReader::new(registry).read_file(&file)?;
    let root = document
        .root()
        .ok_or_else(|| format!("{} has no root element", file.display()))?;

    let diagnostics = match root.as_object() {
        Some(object) => Diagnostician::new(registry).validate(object.as_model()),
        None => Vec::new(),
    };

    if echo {
        println!("{}", XmlWriter::new(registry).write_document(&document)?);
    }

    let errors = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
    for diagnostic in &diagnostics {
        println!("  - {}", diagnostic);
    }
    if errors == 0 {
        println!("✓ {} is valid ({})", file.display(), root.element);
        Ok(())
    } else {
        println!("✗ {} has {} error(s)", file.display(), errors);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
