//! Compiles each primitive unit as its own static library.
//!
//! The flags come from the build plan: `$FFP_PLAN` if set, else the nearest
//! `ffp.toml`, else the recommended plan. A plan that breaks the contract
//! fails the build before anything is compiled.

use std::env;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ffp_codegen::{find_plan, BuildPlan, ContractError, UnitConfig};

type BuildResult<T> = Result<T, Box<dyn Error>>;

fn main() -> BuildResult<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=csrc/ffp.h");
    println!("cargo:rerun-if-env-changed=FFP_PLAN");
    println!("cargo:rerun-if-env-changed=FFP_CROSS_LANGUAGE_LTO");

    let manifest_dir = Utf8PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let (plan, root) = resolve_plan(&manifest_dir)?;
    plan.validate()?;

    // Thin-LTO objects are LLVM bitcode, which only a linker-plugin LTO
    // link can consume.
    let cross_language_lto = env::var_os("FFP_CROSS_LANGUAGE_LTO").is_some();

    let mut built = Vec::with_capacity(plan.units.len());
    for unit in &plan.units {
        let args = unit_args(unit, cross_language_lto);
        compile_unit(unit, &root, &manifest_dir, &args)?;
        built.push((unit, args));
    }

    let out_dir = Utf8PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("built_units.rs"), render_built_units(&built)?)?;
    Ok(())
}

/// The plan and the directory its unit sources are relative to.
fn resolve_plan(manifest_dir: &Utf8Path) -> BuildResult<(BuildPlan, Utf8PathBuf)> {
    if let Some(path) = env::var_os("FFP_PLAN") {
        let path = Utf8PathBuf::try_from(std::path::PathBuf::from(path))?;
        println!("cargo:rerun-if-changed={path}");
        let root = plan_root(&path);
        return Ok((BuildPlan::load(&path)?, root));
    }

    match find_plan(manifest_dir) {
        Ok(path) => {
            println!("cargo:rerun-if-changed={path}");
            let root = plan_root(&path);
            Ok((BuildPlan::load(&path)?, root))
        }
        // Recommended sources are relative to the workspace root.
        Err(ContractError::ConfigNotFound(_)) => {
            Ok((BuildPlan::recommended(), manifest_dir.join("../..")))
        }
        Err(e) => Err(e.into()),
    }
}

fn plan_root(path: &Utf8Path) -> Utf8PathBuf {
    path.parent()
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|| Utf8PathBuf::from("."))
}

fn unit_args(unit: &UnitConfig, cross_language_lto: bool) -> Vec<&'static str> {
    unit.compiler_args()
        .into_iter()
        .filter(|arg| cross_language_lto || !arg.starts_with("-flto"))
        .collect()
}

fn compile_unit(
    unit: &UnitConfig,
    root: &Utf8Path,
    manifest_dir: &Utf8Path,
    args: &[&str],
) -> BuildResult<()> {
    let source = root.join(&unit.source);
    println!("cargo:rerun-if-changed={source}");

    let mut build = cc::Build::new();
    build.file(&source).include(manifest_dir.join("csrc"));
    for arg in args {
        build.flag(*arg);
    }
    build.try_compile(&unit.library())?;
    Ok(())
}

fn render_built_units(built: &[(&UnitConfig, Vec<&str>)]) -> BuildResult<String> {
    let mut out = String::from("/// Units linked into this build, in plan order.\n");
    out.push_str("pub static BUILT_UNITS: &[BuiltUnit] = &[\n");
    for (unit, args) in built {
        writeln!(out, "    BuiltUnit {{")?;
        writeln!(out, "        class: SafetyClass::{:?},", unit.class)?;
        writeln!(out, "        source: {:?},", unit.source.as_str())?;
        writeln!(out, "        args: &{args:?},")?;
        writeln!(
            out,
            "        finite_math_only: {},",
            unit.fast_math.finite_math_only
        )?;
        writeln!(out, "    }},")?;
    }
    out.push_str("];\n");
    Ok(out)
}
